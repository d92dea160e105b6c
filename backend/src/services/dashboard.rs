//! Dashboard data orchestration: fetch both indicators, then merge.

use tracing::{error, info};

use super::aggregator::{merge_with_policy, DuplicateYears};
use super::fetcher::{FetchError, IndicatorSource};
use crate::config::IndicatorSettings;
use crate::models::{CountrySeries, Indicator};

/// Failure to assemble the dashboard data.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// One of the indicators could not be fetched. Partial data is never served.
    #[error("{indicator} data unavailable: {source}")]
    IndicatorUnavailable {
        indicator: Indicator,
        #[source]
        source: FetchError,
    },
}

/// Fetch population growth and GDP per capita concurrently and merge them.
///
/// Fails if either fetch fails; an empty result from the source is not a
/// failure.
pub async fn load_dashboard(
    source: &dyn IndicatorSource,
    indicators: &IndicatorSettings,
    duplicates: DuplicateYears,
) -> Result<Vec<CountrySeries>, DashboardError> {
    let (population, gdp) = tokio::join!(
        source.fetch(&indicators.population_code),
        source.fetch(&indicators.gdp_code)
    );

    let population = population.map_err(|e| unavailable(Indicator::PopulationGrowth, e))?;
    let gdp = gdp.map_err(|e| unavailable(Indicator::GdpPerCapita, e))?;

    let merged = merge_with_policy(&population, &gdp, duplicates);
    info!(
        population = population.len(),
        gdp = gdp.len(),
        countries = merged.len(),
        "Merged dashboard indicators"
    );

    Ok(merged)
}

fn unavailable(indicator: Indicator, source: FetchError) -> DashboardError {
    error!("Aborting dashboard request: {} unavailable", indicator);
    DashboardError::IndicatorUnavailable { indicator, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Observation, YearPoint};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::StatusCode;
    use std::collections::HashMap;

    /// Source serving canned observations per code; unknown codes fail.
    struct StubSource {
        data: HashMap<String, Vec<Observation>>,
        calls: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn new(data: &[(&str, Vec<Observation>)]) -> Self {
            Self {
                data: data
                    .iter()
                    .map(|(code, obs)| (code.to_string(), obs.clone()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IndicatorSource for StubSource {
        async fn fetch(&self, indicator_code: &str) -> Result<Vec<Observation>, FetchError> {
            self.calls.lock().push(indicator_code.to_string());
            self.data
                .get(indicator_code)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: format!("stub://{}", indicator_code),
                    status: StatusCode::BAD_GATEWAY,
                })
        }
    }

    fn settings() -> IndicatorSettings {
        IndicatorSettings::default()
    }

    #[tokio::test]
    async fn test_load_dashboard_merges_both_indicators() {
        let source = StubSource::new(&[
            (
                "SP.POP.GROW",
                vec![Observation::new("USA", "United States", 2020, Some(1.5))],
            ),
            (
                "NY.GDP.PCAP.CD",
                vec![Observation::new("USA", "United States", 2020, Some(63000.0))],
            ),
        ]);

        let data = load_dashboard(&source, &settings(), DuplicateYears::KeepAll)
            .await
            .unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(
            data[0].data,
            vec![YearPoint {
                year: 2020,
                population_growth: 1.5,
                gdp_per_capita: 63000.0
            }]
        );

        let mut calls = source.calls.lock().clone();
        calls.sort();
        assert_eq!(calls, vec!["NY.GDP.PCAP.CD", "SP.POP.GROW"]);
    }

    #[tokio::test]
    async fn test_load_dashboard_empty_source_is_not_an_error() {
        let source = StubSource::new(&[("SP.POP.GROW", vec![]), ("NY.GDP.PCAP.CD", vec![])]);

        let data = load_dashboard(&source, &settings(), DuplicateYears::KeepAll)
            .await
            .unwrap();

        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_load_dashboard_fails_when_gdp_unavailable() {
        let source = StubSource::new(&[(
            "SP.POP.GROW",
            vec![Observation::new("USA", "United States", 2020, Some(1.5))],
        )]);

        let err = load_dashboard(&source, &settings(), DuplicateYears::KeepAll)
            .await
            .unwrap_err();

        let DashboardError::IndicatorUnavailable { indicator, .. } = err;
        assert_eq!(indicator, Indicator::GdpPerCapita);
    }

    #[tokio::test]
    async fn test_load_dashboard_fails_when_population_unavailable() {
        let source = StubSource::new(&[("NY.GDP.PCAP.CD", vec![])]);

        let err = load_dashboard(&source, &settings(), DuplicateYears::KeepAll)
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("population growth data unavailable"));
    }

    #[tokio::test]
    async fn test_load_dashboard_uses_configured_codes() {
        let indicators = IndicatorSettings {
            population_code: "POP".to_string(),
            gdp_code: "GDP".to_string(),
            ..Default::default()
        };
        let source = StubSource::new(&[
            ("POP", vec![Observation::new("IND", "India", 2019, Some(1.0))]),
            ("GDP", vec![]),
        ]);

        let data = load_dashboard(&source, &indicators, DuplicateYears::KeepFirst)
            .await
            .unwrap();

        assert_eq!(data[0].country, "India");
    }
}
