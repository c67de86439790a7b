use std::{collections::BTreeMap, fmt::Debug, ops::RangeInclusive};

use serde::Serialize;
use tracing::debug;

use crate::{
    data::{Observation, PriceSeries},
    error::AnalysisError,
    util::{
        date_utils::calendar_year,
        math_utils::{mean, percent_change},
    },
};

/// First and last adjusted close of one period and the return between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReturn<K = i32> {
    pub period: K,
    pub first_price: f64,
    pub last_price: f64,
    pub return_pct: f64,
}

impl<K: Debug> PeriodReturn<K> {
    fn from_partition(period: K, partition: &[&Observation]) -> Result<Self, AnalysisError> {
        let (first, last) = match (partition.first(), partition.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(AnalysisError::EmptyPeriod {
                    period: format!("{:?}", period),
                })
            }
        };
        let return_pct = percent_change(first.adjusted_close, last.adjusted_close).ok_or_else(
            || AnalysisError::UndefinedReturn {
                context: format!("period {:?}", period),
            },
        )?;
        Ok(Self {
            period,
            first_price: first.adjusted_close,
            last_price: last.adjusted_close,
            return_pct,
        })
    }
}

/// A positive period return and its share of all positive returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnShare<K = i32> {
    pub period: K,
    pub return_pct: f64,
    pub share_pct: f64,
}

/// Partitions the series by `key_fn` and computes each partition's return.
///
/// Partitions come back in key order. Within a partition the first and last
/// observations are taken in date order, so a period never borrows a price
/// from its neighbour.
pub fn group_by_period<K, F>(
    series: &PriceSeries,
    key_fn: F,
) -> Result<Vec<PeriodReturn<K>>, AnalysisError>
where
    K: Ord + Debug,
    F: Fn(&chrono::NaiveDate) -> K,
{
    let mut partitions: BTreeMap<K, Vec<&Observation>> = BTreeMap::new();
    for observation in series {
        partitions
            .entry(key_fn(&observation.date))
            .or_default()
            .push(observation);
    }

    partitions
        .into_iter()
        .map(|(period, partition)| {
            debug!(?period, observations = partition.len(), "Computing period return");
            PeriodReturn::from_partition(period, &partition)
        })
        .collect()
}

/// Calendar-year returns for every year in `years`. A year without any
/// observation is an `EmptyPeriod` error rather than a silent gap.
pub fn group_by_years(
    series: &PriceSeries,
    years: RangeInclusive<i32>,
) -> Result<Vec<PeriodReturn>, AnalysisError> {
    let observations = series.in_years(*years.start(), *years.end());
    let mut partitions: BTreeMap<i32, Vec<&Observation>> =
        years.clone().map(|year| (year, Vec::new())).collect();
    for observation in observations {
        if let Some(partition) = partitions.get_mut(&calendar_year(&observation.date)) {
            partition.push(observation);
        }
    }

    partitions
        .into_iter()
        .map(|(year, partition)| PeriodReturn::from_partition(year, &partition))
        .collect()
}

/// Percent change between the earliest and the latest observation.
pub fn total_return(series: &PriceSeries) -> Result<f64, AnalysisError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= 2 => (first, last),
        _ => {
            return Err(AnalysisError::InsufficientData {
                got: series.len(),
                required: 2,
            })
        }
    };
    percent_change(first.adjusted_close, last.adjusted_close).ok_or_else(|| {
        AnalysisError::UndefinedReturn {
            context: format!("total return from {}", first.date),
        }
    })
}

/// Arithmetic mean of `return_pct` over periods whose key lies in `range`.
pub fn average_return<K>(
    period_returns: &[PeriodReturn<K>],
    range: RangeInclusive<K>,
) -> Result<f64, AnalysisError>
where
    K: Ord + Debug,
{
    let returns = period_returns
        .iter()
        .filter(|r| range.contains(&r.period))
        .map(|r| r.return_pct)
        .collect::<Vec<_>>();
    mean(&returns).ok_or_else(|| AnalysisError::EmptyRange {
        start: format!("{:?}", range.start()),
        end: format!("{:?}", range.end()),
    })
}

/// Keeps the periods with a strictly positive return, in their original order.
pub fn positive_returns<K: Clone>(period_returns: &[PeriodReturn<K>]) -> Vec<PeriodReturn<K>> {
    period_returns
        .iter()
        .filter(|r| r.return_pct > 0.0)
        .cloned()
        .collect()
}

/// Positive returns with their percentage of the positive total, the
/// proportions a pie chart of gains would show.
pub fn return_shares<K: Clone>(period_returns: &[PeriodReturn<K>]) -> Vec<ReturnShare<K>> {
    let positive = positive_returns(period_returns);
    let total: f64 = positive.iter().map(|r| r.return_pct).sum();
    positive
        .into_iter()
        .map(|r| ReturnShare {
            share_pct: r.return_pct / total * 100.0,
            period: r.period,
            return_pct: r.return_pct,
        })
        .collect()
}
