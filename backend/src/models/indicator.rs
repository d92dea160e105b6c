//! Indicator observations and the merged per-country series.
//!
//! `Observation` mirrors the wire shape of the indicator source; `CountrySeries`
//! and `YearPoint` are what the dashboard client consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two indicators shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    PopulationGrowth,
    GdpPerCapita,
}

impl Indicator {
    /// Human-readable label used in logs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::PopulationGrowth => "population growth",
            Indicator::GdpPerCapita => "GDP per capita",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `{ id, value }` pair the source uses for country references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRef {
    pub id: String,
    pub value: String,
}

/// One raw (country, indicator, year) measurement as returned by the source.
///
/// Fields the dashboard does not use (`indicator`, `unit`, `obs_status`, ...)
/// are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub country: CountryRef,
    /// Year as the source sends it, e.g. `"2020"`.
    pub date: String,
    /// `None` when the indicator was not reported for this country/year.
    #[serde(default)]
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(
        country_id: impl Into<String>,
        country_name: impl Into<String>,
        year: i32,
        value: Option<f64>,
    ) -> Self {
        Self {
            country: CountryRef {
                id: country_id.into(),
                value: country_name.into(),
            },
            date: year.to_string(),
            value,
        }
    }

    pub fn country_id(&self) -> &str {
        &self.country.id
    }

    pub fn country_name(&self) -> &str {
        &self.country.value
    }

    /// Parsed year, or `None` if `date` is not an integer.
    pub fn year(&self) -> Option<i32> {
        self.date.trim().parse().ok()
    }
}

/// Both indicators for one country and year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearPoint {
    pub year: i32,
    pub population_growth: f64,
    /// Stays `0.0` until a GDP observation for the same year is merged in.
    pub gdp_per_capita: f64,
}

impl YearPoint {
    pub fn new(year: i32, population_growth: f64) -> Self {
        Self {
            year,
            population_growth,
            gdp_per_capita: 0.0,
        }
    }
}

/// Merged series for a single country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySeries {
    /// Country display name.
    pub country: String,
    pub data: Vec<YearPoint>,
}

impl CountrySeries {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            data: Vec::new(),
        }
    }

    /// First point recorded for `year`.
    pub fn point(&self, year: i32) -> Option<&YearPoint> {
        self.data.iter().find(|p| p.year == year)
    }

    pub fn point_mut(&mut self, year: i32) -> Option<&mut YearPoint> {
        self.data.iter_mut().find(|p| p.year == year)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
