use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::{error::StockError, util::date_utils::parse_date};

/// One trading day of the input data set.
#[derive(Debug, Clone, Copy, Builder, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub adjusted_close: f64,
    #[builder(default)]
    pub volume: u64,
}

/// A CSV row as it appears on disk. Every field is kept as text so a bad
/// value can be reported with its column name and row number.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Adj_Close", alias = "Adj Close")]
    pub adjusted_close: String,
    #[serde(rename = "Volume")]
    pub volume: String,
}

impl Observation {
    pub fn new(date: NaiveDate, adjusted_close: f64, volume: u64) -> Self {
        Self {
            date,
            adjusted_close,
            volume,
        }
    }

    // Create a new Observation from a raw CSV record
    //
    // # Arguments
    //
    // * `record` - The record to convert.
    // * `row` - 1-based data row number, used in error messages.
    //
    // # Returns
    //
    // A Result containing the Observation if successful, or a StockError naming the bad column.
    pub fn from_record(record: &CsvRecord, row: usize) -> Result<Self, StockError> {
        let date = parse_date(record.date.trim()).map_err(|_| StockError::ParseError {
            value_name: "Date".to_string(),
            row,
        })?;
        let adjusted_close = record
            .adjusted_close
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(StockError::ParseError {
                value_name: "Adj_Close".to_string(),
                row,
            })?;
        let volume = parse_volume(record.volume.trim()).ok_or(StockError::ParseError {
            value_name: "Volume".to_string(),
            row,
        })?;
        Ok(Self {
            date,
            adjusted_close,
            volume,
        })
    }
}

/// Volumes are whole share counts, but some exports write them as floats
/// ("1200.0"). Fractional, negative and non-finite values are rejected.
fn parse_volume(raw: &str) -> Option<u64> {
    if let Ok(volume) = raw.parse::<u64>() {
        return Some(volume);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

impl PartialEq for Observation {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.adjusted_close == other.adjusted_close
            && self.volume == other.volume
    }
}

/// Orders by date, then by price and volume so that equal ordering implies
/// equality.
impl PartialOrd for Observation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.date.cmp(&other.date) {
            std::cmp::Ordering::Equal => {}
            ordering => return Some(ordering),
        }
        match self.adjusted_close.partial_cmp(&other.adjusted_close)? {
            std::cmp::Ordering::Equal => Some(self.volume.cmp(&other.volume)),
            ordering => Some(ordering),
        }
    }
}
