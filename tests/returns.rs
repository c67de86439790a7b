use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use common::{arb_observations, arb_shuffled_observations};
use proptest::prelude::*;
use stocklens::{
    analysis::{
        average_return, group_by_period, positive_returns, total_return, window_mean,
        PeriodReturn,
    },
    data::{Observation, PriceSeries},
    error::AnalysisError,
    util::date_utils::calendar_year,
};

mod common;

proptest! {
    #[test]
    fn total_return_uses_date_order((ordered, shuffled) in arb_shuffled_observations()) {
        let series = PriceSeries::new(shuffled);
        let first = ordered.first().unwrap().adjusted_close;
        let last = ordered.last().unwrap().adjusted_close;
        let expected = (last - first) / first * 100.0;
        prop_assert_eq!(total_return(&series).unwrap(), expected);
    }

    #[test]
    fn period_partitions_are_exhaustive(observations in arb_observations()) {
        let series = PriceSeries::new(observations.clone());
        let returns = group_by_period(&series, calendar_year).unwrap();

        let mut by_year: BTreeMap<i32, Vec<&Observation>> = BTreeMap::new();
        for o in &observations {
            by_year.entry(o.date.year()).or_default().push(o);
        }
        prop_assert_eq!(returns.len(), by_year.len());
        for (r, (year, members)) in returns.iter().zip(by_year.iter()) {
            prop_assert_eq!(r.period, *year);
            let first = members.iter().min_by_key(|o| o.date).unwrap();
            let last = members.iter().max_by_key(|o| o.date).unwrap();
            prop_assert_eq!(r.first_price, first.adjusted_close);
            prop_assert_eq!(r.last_price, last.adjusted_close);
        }
    }

    #[test]
    fn average_over_single_period_is_its_return(observations in arb_observations()) {
        let series = PriceSeries::new(observations);
        let returns = group_by_period(&series, calendar_year).unwrap();
        for r in &returns {
            prop_assert_eq!(average_return(&returns, r.period..=r.period).unwrap(), r.return_pct);
        }
    }

    #[test]
    fn positive_returns_are_an_ordered_subset(observations in arb_observations()) {
        let series = PriceSeries::new(observations);
        let returns = group_by_period(&series, calendar_year).unwrap();
        let positive = positive_returns(&returns);
        prop_assert!(positive.iter().all(|r| r.return_pct > 0.0));
        prop_assert!(positive.windows(2).all(|w| w[0].period < w[1].period));
        prop_assert_eq!(
            positive.len(),
            returns.iter().filter(|r| r.return_pct > 0.0).count()
        );
    }

    #[test]
    fn window_mean_ignores_input_order(
        (ordered, shuffled) in arb_shuffled_observations(),
        start_offset in 0u64..3000,
        length in 0u64..1500,
    ) {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + chrono::Days::new(start_offset);
        let end = start + chrono::Days::new(length);
        let a = PriceSeries::new(ordered);
        let b = PriceSeries::new(shuffled);
        let first = window_mean(&a, start, end);
        prop_assert_eq!(first.clone(), window_mean(&b, start, end));
        prop_assert_eq!(first, window_mean(&a, start, end));
    }
}

#[test]
fn empty_range_is_an_error() {
    let returns: Vec<PeriodReturn> = vec![PeriodReturn {
        period: 2020,
        first_price: 100.0,
        last_price: 150.0,
        return_pct: 50.0,
    }];
    assert!(matches!(
        average_return(&returns, 2014..=2019),
        Err(AnalysisError::EmptyRange { .. })
    ));
}

#[test]
fn worked_example_by_year() {
    let series: PriceSeries = [
        ("2020-01-01", 100.0),
        ("2020-12-31", 150.0),
        ("2021-12-31", 120.0),
    ]
    .iter()
    .map(|(d, p)| Observation::new(d.parse().unwrap(), *p, 0))
    .collect();
    let returns = group_by_period(&series, calendar_year).unwrap();
    assert_eq!(returns[0].return_pct, 50.0);
    assert_eq!((returns[1].first_price, returns[1].last_price), (120.0, 120.0));
    assert_eq!(returns[1].return_pct, 0.0);
}
