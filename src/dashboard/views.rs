use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    analysis::{PeriodReturn, ReturnShare, WindowStat},
    data::{Observation, YearVolume},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", rename_all = "kebab-case")]
pub enum VisualizationChart {
    Bar { volumes: Vec<YearVolume> },
    Line { prices: Vec<Observation> },
}

/// Volume or price data for a year range plus the most recent rows of the
/// whole data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationView {
    pub start_year: i32,
    pub end_year: i32,
    pub recent_rows: Vec<Observation>,
    #[serde(flatten)]
    pub chart: VisualizationChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", rename_all = "kebab-case")]
pub enum InvestmentChart {
    Pie { shares: Vec<ReturnShare> },
    Line { returns: Vec<PeriodReturn> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentView {
    pub total_return: f64,
    pub average_annual_return: f64,
    pub annual_returns: Vec<PeriodReturn>,
    pub recent_start_year: i32,
    pub recent_end_year: i32,
    /// `None` when no year of the recent range has data.
    pub recent_average_return: Option<f64>,
    #[serde(flatten)]
    pub chart: InvestmentChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", rename_all = "kebab-case")]
pub enum CovidChart {
    Bar { windows: Vec<WindowStat> },
    Line { prices: Vec<Observation> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovidView {
    pub covid_start: NaiveDate,
    pub covid_end: NaiveDate,
    #[serde(flatten)]
    pub chart: CovidChart,
}

fn write_prices(f: &mut fmt::Formatter<'_>, prices: &[Observation]) -> fmt::Result {
    writeln!(f, "{:<12} {:>14} {:>14}", "Date", "Adj Close", "Volume")?;
    for o in prices {
        writeln!(
            f,
            "{:<12} {:>14.2} {:>14}",
            o.date.to_string(),
            o.adjusted_close,
            o.volume
        )?;
    }
    Ok(())
}

fn write_returns(f: &mut fmt::Formatter<'_>, returns: &[PeriodReturn]) -> fmt::Result {
    writeln!(
        f,
        "{:<6} {:>12} {:>12} {:>10}",
        "Year", "First", "Last", "Return"
    )?;
    for r in returns {
        writeln!(
            f,
            "{:<6} {:>12.2} {:>12.2} {:>9.2}%",
            r.period, r.first_price, r.last_price, r.return_pct
        )?;
    }
    Ok(())
}

/// Formats a share count the way an axis label would: `12.3M`, `4.5K`.
fn compact_volume(volume: u64) -> String {
    let value = volume as f64;
    if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else {
        format!("{:.1}K", value / 1e3)
    }
}

impl fmt::Display for VisualizationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Last {} values", self.recent_rows.len())?;
        write_prices(f, &self.recent_rows)?;
        writeln!(f)?;
        match &self.chart {
            VisualizationChart::Bar { volumes } => {
                writeln!(
                    f,
                    "Stock volume over years ({}-{})",
                    self.start_year, self.end_year
                )?;
                writeln!(f, "{:<6} {:>10}", "Year", "Volume")?;
                for v in volumes {
                    writeln!(f, "{:<6} {:>10}", v.year, compact_volume(v.volume))?;
                }
            }
            VisualizationChart::Line { prices } => {
                writeln!(
                    f,
                    "Adjusted close prices ({}-{})",
                    self.start_year, self.end_year
                )?;
                write_prices(f, prices)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for InvestmentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total Return: {:.2}% | Average Annual Return: {:.2}%",
            self.total_return, self.average_annual_return
        )?;
        match self.recent_average_return {
            Some(avg) => writeln!(
                f,
                "Average Annual Return {}-{}: {:.2}%",
                self.recent_start_year, self.recent_end_year, avg
            )?,
            None => writeln!(
                f,
                "Average Annual Return {}-{}: n/a",
                self.recent_start_year, self.recent_end_year
            )?,
        }
        writeln!(f)?;
        match &self.chart {
            InvestmentChart::Pie { shares } => {
                writeln!(
                    f,
                    "Positive annual returns ({}-{})",
                    self.recent_start_year, self.recent_end_year
                )?;
                writeln!(f, "{:<6} {:>10} {:>8}", "Year", "Return", "Share")?;
                for s in shares {
                    writeln!(
                        f,
                        "{:<6} {:>9.2}% {:>7.1}%",
                        s.period, s.return_pct, s.share_pct
                    )?;
                }
            }
            InvestmentChart::Line { returns } => {
                writeln!(
                    f,
                    "Annual returns ({}-{})",
                    self.recent_start_year, self.recent_end_year
                )?;
                write_returns(f, returns)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CovidView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.chart {
            CovidChart::Bar { windows } => {
                writeln!(f, "Average adjusted close prices around COVID-19")?;
                writeln!(
                    f,
                    "{:<14} {:<12} {:<12} {:>12}",
                    "Period", "From", "To", "Avg Price"
                )?;
                for w in windows {
                    let mean = w
                        .mean_price
                        .map(|m| format!("{:.2}", m))
                        .unwrap_or_else(|| "n/a".to_string());
                    writeln!(
                        f,
                        "{:<14} {:<12} {:<12} {:>12}",
                        w.label,
                        w.start.to_string(),
                        w.end.to_string(),
                        mean
                    )?;
                }
            }
            CovidChart::Line { prices } => {
                writeln!(
                    f,
                    "Adjusted close prices during COVID-19 ({} to {})",
                    self.covid_start, self.covid_end
                )?;
                write_prices(f, prices)?;
            }
        }
        Ok(())
    }
}
