use std::path::Path;
use tracing::subscriber::set_default;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

use crate::{
    data::{Observation, PriceSeries},
    util::date_utils::parse_date,
};

pub struct TracingGuards {
    _subscriber_guard: tracing::subscriber::DefaultGuard,
    _worker_guard: WorkerGuard,
}

pub fn setup_test_tracing(test_name: &str) -> TracingGuards {
    let log_dir = Path::new("tests/logs");
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).unwrap();
    }

    let log_file = format!("{}.log", test_name);
    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = fmt::Subscriber::builder()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    // Set as default subscriber for this thread
    let subscriber_guard = set_default(subscriber);

    TracingGuards {
        _subscriber_guard: subscriber_guard,
        _worker_guard: worker_guard,
    }
}

/// Builds a series from `(YYYY-MM-DD, adjusted close)` pairs with a fixed
/// volume of 1000 per day. Panics on a malformed date.
pub fn series_from(points: &[(&str, f64)]) -> PriceSeries {
    points
        .iter()
        .map(|(date, price)| {
            let date = parse_date(date).unwrap_or_else(|e| panic!("bad test date {}: {}", date, e));
            Observation::new(date, *price, 1000)
        })
        .collect()
}
