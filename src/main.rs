use std::error::Error;

use clap::Parser;
use stocklens::{
    args::{Args, Section},
    config::DashboardConfig,
    dashboard::{Dashboard, Report},
    logging::setup_tracing,
};
use tracing::{error, info};

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _guard = setup_tracing(Some(args.log_dir.as_path()))?;

    let mut config = DashboardConfig::read_config(Some(&args.config))?;
    if let Some(data) = args.data.clone() {
        config.data_file = data;
    }
    let dashboard = Dashboard::load(config)?;
    info!("Loaded {} observations", dashboard.series().len());

    let report = match build_report(&dashboard, &args.command) {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to build {:?} section: {}", args.command, e);
            return Err(e);
        }
    };
    println!("{}", report.render(args.format)?);
    Ok(())
}

fn build_report(dashboard: &Dashboard, section: &Section) -> Result<Report, Box<dyn Error>> {
    let report = match *section {
        Section::Visualize {
            start_year,
            end_year,
            chart,
        } => {
            let config = dashboard.config();
            let start_year = start_year.unwrap_or(config.min_year);
            let end_year = end_year.unwrap_or(config.max_year);
            Report::Visualization(dashboard.visualize(start_year, end_year, chart)?)
        }
        Section::Invest { chart } => Report::Investment(dashboard.invest(chart)?),
        Section::Covid { chart } => Report::Covid(dashboard.covid(chart)?),
    };
    Ok(report)
}
