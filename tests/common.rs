#![allow(dead_code)]

use std::io::Write;

use chrono::{Days, NaiveDate};
use proptest::{collection, prelude::*, strategy::Strategy};
use stocklens::data::Observation;
use tempfile::NamedTempFile;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
}

/// Observations on distinct dates spread over roughly eight years, with
/// strictly positive prices.
pub fn arb_observations() -> impl Strategy<Value = Vec<Observation>> {
    collection::btree_set(0u64..3000, 2..60).prop_flat_map(|offsets| {
        let len = offsets.len();
        (
            Just(offsets),
            collection::vec(1.0f64..1000.0, len),
            collection::vec(0u64..5_000_000, len),
        )
            .prop_map(|(offsets, prices, volumes)| {
                offsets
                    .into_iter()
                    .zip(prices)
                    .zip(volumes)
                    .map(|((offset, price), volume)| {
                        let date = base_date().checked_add_days(Days::new(offset)).unwrap();
                        Observation::new(date, price, volume)
                    })
                    .collect::<Vec<_>>()
            })
    })
}

/// The same observations in date order and in a shuffled order.
pub fn arb_shuffled_observations() -> impl Strategy<Value = (Vec<Observation>, Vec<Observation>)>
{
    arb_observations().prop_flat_map(|ordered| {
        let shuffled = Just(ordered.clone()).prop_shuffle();
        (Just(ordered), shuffled)
    })
}

/// Writes `(date, adjusted close, volume)` rows to a temporary CSV file with
/// the usual Yahoo-style header.
pub fn write_csv(rows: &[(&str, &str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Adj_Close,Volume").unwrap();
    for (date, adjusted_close, volume) in rows {
        writeln!(
            file,
            "{date},{adjusted_close},{adjusted_close},{adjusted_close},{adjusted_close},{adjusted_close},{volume}"
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}
