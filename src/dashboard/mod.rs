use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    analysis::{
        average_return, compare_around, group_by_years, return_shares, total_return,
        PeriodReturn,
    },
    config::DashboardConfig,
    data::{loader::load_series, series::sum_volume_by_year, PriceSeries},
    error::{AnalysisError, StockError},
};

pub mod views;

pub use views::{
    CovidChart, CovidView, InvestmentChart, InvestmentView, VisualizationChart,
    VisualizationView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VolumePriceChart {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReturnChart {
    Pie,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The output of one dashboard section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Visualization(VisualizationView),
    Investment(InvestmentView),
    Covid(CovidView),
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String, StockError> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Report::Visualization(view) => std::fmt::Display::fmt(view, f),
            Report::Investment(view) => std::fmt::Display::fmt(view, f),
            Report::Covid(view) => std::fmt::Display::fmt(view, f),
        }
    }
}

/// Holds the loaded series and the configuration. Each section is computed
/// fresh from the immutable series on every call.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    series: PriceSeries,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, series: PriceSeries) -> Self {
        Self { config, series }
    }

    /// Loads the configured CSV file.
    #[instrument(level = "info", skip(config))]
    pub fn load(config: DashboardConfig) -> Result<Self, StockError> {
        let series = load_series(&config.data_file, config.skip_invalid_rows)?;
        Ok(Self::new(config, series))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    fn validate_year_range(&self, start_year: i32, end_year: i32) -> Result<(), StockError> {
        let (min, max) = (self.config.min_year, self.config.max_year);
        let start_ok = start_year >= min && start_year < max;
        let end_ok = end_year > start_year && end_year <= max;
        if start_ok && end_ok {
            Ok(())
        } else {
            Err(StockError::InvalidYearRange {
                start: start_year,
                end: end_year,
                min,
                max,
            })
        }
    }

    /// Volume per year (bar) or price points (line) for a year range.
    pub fn visualize(
        &self,
        start_year: i32,
        end_year: i32,
        chart: VolumePriceChart,
    ) -> Result<VisualizationView, StockError> {
        self.validate_year_range(start_year, end_year)?;
        info!(start_year, end_year, ?chart, "Building stock visualization");

        let in_range = self.series.in_years(start_year, end_year);
        let chart = match chart {
            VolumePriceChart::Bar => VisualizationChart::Bar {
                volumes: sum_volume_by_year(in_range),
            },
            VolumePriceChart::Line => VisualizationChart::Line {
                prices: in_range.to_vec(),
            },
        };
        Ok(VisualizationView {
            start_year,
            end_year,
            recent_rows: self.series.tail(self.config.tail_rows).to_vec(),
            chart,
        })
    }

    /// Annual returns, total and average return, and the recent range as
    /// pie shares or a return line.
    ///
    /// A year whose return is undefined (zero opening price) is left out of
    /// the annual returns and the averages instead of failing the view.
    pub fn invest(&self, chart: ReturnChart) -> Result<InvestmentView, StockError> {
        info!(?chart, "Building investment analysis");
        let total = total_return(&self.series)?;
        let mut annual_returns: Vec<PeriodReturn> = Vec::new();
        for year in self.series.yearly_volume().into_iter().map(|v| v.year) {
            match group_by_years(&self.series, year..=year) {
                Ok(mut returns) => annual_returns.append(&mut returns),
                Err(AnalysisError::UndefinedReturn { context }) => {
                    warn!(year, "Skipping annual return: {}", context);
                }
                Err(e) => return Err(e.into()),
            }
        }
        let all_years = match (annual_returns.first(), annual_returns.last()) {
            (Some(first), Some(last)) => first.period..=last.period,
            _ => {
                return Err(AnalysisError::InsufficientData {
                    got: self.series.len(),
                    required: 2,
                }
                .into())
            }
        };
        let average_annual_return = average_return(&annual_returns, all_years)?;

        let recent_range = self.config.recent_start_year..=self.config.recent_end_year;
        let recent: Vec<PeriodReturn> = annual_returns
            .iter()
            .filter(|r| recent_range.contains(&r.period))
            .cloned()
            .collect();
        let recent_average_return = match average_return(&recent, recent_range) {
            Ok(avg) => Some(avg),
            Err(e) => {
                warn!("No recent average return: {}", e);
                None
            }
        };

        let chart = match chart {
            ReturnChart::Pie => InvestmentChart::Pie {
                shares: return_shares(&recent),
            },
            ReturnChart::Line => InvestmentChart::Line { returns: recent },
        };
        Ok(InvestmentView {
            total_return: total,
            average_annual_return,
            annual_returns,
            recent_start_year: self.config.recent_start_year,
            recent_end_year: self.config.recent_end_year,
            recent_average_return,
            chart,
        })
    }

    /// Mean prices around the COVID window (bar) or the prices inside it (line).
    pub fn covid(&self, chart: VolumePriceChart) -> Result<CovidView, StockError> {
        let (covid_start, covid_end) = (self.config.covid_start()?, self.config.covid_end()?);
        info!(%covid_start, %covid_end, ?chart, "Building COVID-19 comparison");
        let chart = match chart {
            VolumePriceChart::Bar => CovidChart::Bar {
                windows: compare_around(&self.series, covid_start, covid_end)?,
            },
            VolumePriceChart::Line => CovidChart::Line {
                prices: self.series.between(covid_start, covid_end).to_vec(),
            },
        };
        Ok(CovidView {
            covid_start,
            covid_end,
            chart,
        })
    }
}
