use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::util::date_utils::{calendar_year, year_bounds};

use super::observation::Observation;

/// Total traded volume of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearVolume {
    pub year: i32,
    pub volume: u64,
}

/// An immutable price series ordered by date.
///
/// Construction sorts the observations by date. When two observations share
/// a date the one that appears later in the input wins, so re-exported rows
/// correct earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    observations: Vec<Observation>,
}

impl PriceSeries {
    pub fn new(observations: Vec<Observation>) -> Self {
        let mut by_date = BTreeMap::new();
        for observation in observations {
            by_date.insert(observation.date, observation);
        }
        Self {
            observations: by_date.into_values().collect(),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Observations with `start <= date <= end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> &[Observation] {
        let lower = self.observations.partition_point(|o| o.date < start);
        let upper = self.observations.partition_point(|o| o.date <= end);
        if lower >= upper {
            return &[];
        }
        &self.observations[lower..upper]
    }

    /// Observations from January 1st of `start_year` to December 31st of
    /// `end_year`.
    pub fn in_years(&self, start_year: i32, end_year: i32) -> &[Observation] {
        match (year_bounds(start_year), year_bounds(end_year)) {
            (Some((start, _)), Some((_, end))) => self.between(start, end),
            _ => &[],
        }
    }

    /// The last `n` observations, or all of them for shorter series.
    pub fn tail(&self, n: usize) -> &[Observation] {
        let skip = self.observations.len().saturating_sub(n);
        &self.observations[skip..]
    }

    /// Volume summed per calendar year, in year order. Years without
    /// observations are absent.
    pub fn yearly_volume(&self) -> Vec<YearVolume> {
        sum_volume_by_year(&self.observations)
    }
}

pub fn sum_volume_by_year(observations: &[Observation]) -> Vec<YearVolume> {
    let mut totals: BTreeMap<i32, u64> = BTreeMap::new();
    for observation in observations {
        let total = totals.entry(calendar_year(&observation.date)).or_default();
        *total = total.saturating_add(observation.volume);
    }
    totals
        .into_iter()
        .map(|(year, volume)| YearVolume { year, volume })
        .collect()
}

impl FromIterator<Observation> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
