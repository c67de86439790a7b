use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::{
    data::PriceSeries,
    error::AnalysisError,
    util::{
        date_utils::{day_after, day_before},
        math_utils::mean,
    },
};

/// A labelled, inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Mean adjusted close over a window. `mean_price` is `None` when the window
/// holds no observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStat {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub mean_price: Option<f64>,
}

impl Window {
    pub fn between(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    /// Everything strictly before `date`, starting at the series' first
    /// observation.
    /// At `NaiveDate::MIN` nothing can precede `date`, so the window is
    /// inverted and therefore empty.
    pub fn before(label: impl Into<String>, series: &PriceSeries, date: NaiveDate) -> Self {
        match day_before(date) {
            Some(end) => {
                let start = series.first().map(|o| o.date).unwrap_or(end);
                Self::between(label, start, end)
            }
            None => Self::between(label, NaiveDate::MAX, date),
        }
    }

    /// Everything strictly after `date`, up to the series' last observation.
    /// At `NaiveDate::MAX` the window is inverted and therefore empty.
    pub fn after(label: impl Into<String>, series: &PriceSeries, date: NaiveDate) -> Self {
        match day_after(date) {
            Some(start) => {
                let end = series.last().map(|o| o.date).unwrap_or(start);
                Self::between(label, start, end)
            }
            None => Self::between(label, date, NaiveDate::MIN),
        }
    }
}

/// Mean adjusted close of observations with `start <= date <= end`.
pub fn window_mean(
    series: &PriceSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64, AnalysisError> {
    let prices = series
        .between(start, end)
        .iter()
        .map(|o| o.adjusted_close)
        .collect::<Vec<_>>();
    debug!(%start, %end, observations = prices.len(), "Computing window mean");
    mean(&prices).ok_or(AnalysisError::EmptyWindow { start, end })
}

pub fn window_stat(series: &PriceSeries, window: &Window) -> Result<WindowStat, AnalysisError> {
    let mean_price = match window_mean(series, window.start, window.end) {
        Ok(mean) => Some(mean),
        Err(AnalysisError::EmptyWindow { .. }) => None,
        Err(e) => return Err(e),
    };
    Ok(WindowStat {
        label: window.label.clone(),
        start: window.start,
        end: window.end,
        mean_price,
    })
}

/// Compares the mean price before, during and after an event window.
///
/// "Before" is strictly earlier than `start`, "after" strictly later than
/// `end`; the event window itself is inclusive on both ends.
pub fn compare_around(
    series: &PriceSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<WindowStat>, AnalysisError> {
    let windows = [
        Window::before("Pre-COVID-19", series, start),
        Window::between("COVID-19", start, end),
        Window::after("Post-COVID-19", series, end),
    ];
    windows
        .iter()
        .map(|window| window_stat(series, window))
        .collect()
}
