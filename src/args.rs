use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::dashboard::{OutputFormat, ReturnChart, VolumePriceChart};

#[derive(Parser, Debug)]
#[command(name = "stocklens", about = "Historical stock price dashboard")]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "STOCKLENS_CONFIG", default_value = "config.yml")]
    pub config: PathBuf,
    /// CSV file to analyse, overriding `data-file` from the configuration
    #[arg(short, long)]
    pub data: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Directory for log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,
    #[command(subcommand)]
    pub command: Section,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Section {
    /// Trading volume or adjusted close prices over a year range
    Visualize {
        #[arg(long)]
        start_year: Option<i32>,
        #[arg(long)]
        end_year: Option<i32>,
        #[arg(long, value_enum, default_value_t = VolumePriceChart::Bar)]
        chart: VolumePriceChart,
    },
    /// Annual returns and investor insights
    Invest {
        #[arg(long, value_enum, default_value_t = ReturnChart::Pie)]
        chart: ReturnChart,
    },
    /// Prices before, during and after COVID-19
    Covid {
        #[arg(long, value_enum, default_value_t = VolumePriceChart::Bar)]
        chart: VolumePriceChart,
    },
}
