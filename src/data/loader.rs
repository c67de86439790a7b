use std::{fs::File, io::Read, path::Path};

use tracing::{debug, info, instrument, warn};

use crate::error::StockError;

use super::{
    observation::{CsvRecord, Observation},
    series::PriceSeries,
};

/// Loads a price series from a CSV file with `Date`, `Adj_Close` and
/// `Volume` columns.
#[instrument(level = "info", skip(path), fields(file = %path.as_ref().display()))]
pub fn load_series<P: AsRef<Path>>(
    path: P,
    skip_invalid_rows: bool,
) -> Result<PriceSeries, StockError> {
    let file = File::open(path.as_ref())?;
    let series = read_series(file, skip_invalid_rows)?;
    info!(
        observations = series.len(),
        first = ?series.first().map(|o| o.date),
        last = ?series.last().map(|o| o.date),
        "Loaded price series"
    );
    Ok(series)
}

/// Reads a price series from any CSV source.
///
/// A row with a missing or malformed value fails the whole read unless
/// `skip_invalid_rows` is set, in which case the row is logged and dropped.
/// Rows the CSV reader itself cannot decode (wrong column count) always fail.
pub fn read_series<R: Read>(reader: R, skip_invalid_rows: bool) -> Result<PriceSeries, StockError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut observations = Vec::new();
    let mut skipped = 0usize;
    for (index, result) in reader.deserialize::<CsvRecord>().enumerate() {
        let row = index + 1;
        let record = result?;
        match Observation::from_record(&record, row) {
            Ok(observation) => observations.push(observation),
            Err(e) if skip_invalid_rows => {
                warn!("Skipping row {}: {}", row, e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        warn!("Skipped {} invalid rows", skipped);
    }
    debug!("Read {} observations", observations.len());
    Ok(PriceSeries::new(observations))
}
