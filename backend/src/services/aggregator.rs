//! Merge of the population and GDP observation lists into per-country series.
//!
//! The join is anchored on population data: a country or year only shows up
//! in the output if a population value was reported for it. GDP values fill in
//! the matching years and are otherwise dropped.

use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{CountrySeries, Observation, YearPoint};

/// How repeated (country, year) population observations are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateYears {
    /// Every population observation becomes its own point.
    #[default]
    KeepAll,
    /// Only the first population observation per (country, year) is kept.
    KeepFirst,
}

/// Merge population and GDP observations with the default duplicate policy.
pub fn merge(population: &[Observation], gdp: &[Observation]) -> Vec<CountrySeries> {
    merge_with_policy(population, gdp, DuplicateYears::KeepAll)
}

/// Merge population and GDP observations into series sorted by country name.
///
/// Observations without a value, or whose date is not a year, are skipped on
/// both sides. Countries left without any point are dropped.
pub fn merge_with_policy(
    population: &[Observation],
    gdp: &[Observation],
    duplicates: DuplicateYears,
) -> Vec<CountrySeries> {
    // Keyed by country id; BTreeMap keeps equal-name ties deterministic.
    let mut by_country: BTreeMap<&str, CountrySeries> = BTreeMap::new();

    for obs in population {
        let (Some(value), Some(year)) = (obs.value, obs.year()) else {
            continue;
        };

        let series = by_country
            .entry(obs.country_id())
            .or_insert_with(|| CountrySeries::new(obs.country_name()));

        if duplicates == DuplicateYears::KeepFirst && series.point(year).is_some() {
            continue;
        }
        series.data.push(YearPoint::new(year, value));
    }

    for obs in gdp {
        let (Some(value), Some(year)) = (obs.value, obs.year()) else {
            continue;
        };

        if let Some(point) = by_country
            .get_mut(obs.country_id())
            .and_then(|series| series.point_mut(year))
        {
            point.gdp_per_capita = value;
        }
    }

    let mut merged: Vec<CountrySeries> = by_country
        .into_values()
        .filter(|series| !series.is_empty())
        .collect();
    let mut collator = Collator::default();
    merged.sort_by(|a, b| collator.collate(a.country.as_str(), b.country.as_str()));
    merged
}

/// Unicode collation (CLDR root) of two display names.
///
/// Accents and case only break ties, so "Côte d'Ivoire" sorts before
/// "Cuba" and "india" before "India".
pub fn compare_country_names(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod aggregator_tests;
