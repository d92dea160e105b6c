//! Indicator source client.
//!
//! The source answers every request with a two-element JSON array: pagination
//! metadata first, then the observation list. Only the observation list is
//! kept. A missing or `null` second element means "no data" and yields an
//! empty list, while transport and HTTP failures yield [`FetchError`], which
//! callers treat as "unavailable".

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::IndicatorSettings;
use crate::models::Observation;

/// Failure to obtain an indicator from the source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("Unexpected payload from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Anything that can produce the raw observations for an indicator code.
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// Fetch every observation for `indicator_code` over the configured
    /// countries and years. `Ok(vec![])` means the source had nothing.
    async fn fetch(&self, indicator_code: &str) -> Result<Vec<Observation>, FetchError>;
}

/// World Bank v2 API client.
pub struct WorldBankClient {
    http: reqwest::Client,
    settings: IndicatorSettings,
}

impl WorldBankClient {
    pub fn new(settings: IndicatorSettings) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http, settings })
    }

    /// Endpoint for one indicator, without the query string.
    pub fn indicator_url(&self, indicator_code: &str) -> String {
        format!(
            "{}/v2/country/{}/indicator/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.country_path(),
            indicator_code
        )
    }

    async fn request(&self, url: &str) -> Result<String, FetchError> {
        let per_page = self.settings.per_page.to_string();
        let date_range = self.settings.date_range();

        let response = self
            .http
            .get(url)
            .query(&[
                ("date", date_range.as_str()),
                ("format", "json"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl IndicatorSource for WorldBankClient {
    async fn fetch(&self, indicator_code: &str) -> Result<Vec<Observation>, FetchError> {
        let url = self.indicator_url(indicator_code);
        debug!(%url, "Fetching indicator {}", indicator_code);

        let result = self
            .request(&url)
            .await
            .and_then(|body| parse_payload(&url, &body));

        match &result {
            Ok(observations) => debug!(
                "Fetched {} observations for {}",
                observations.len(),
                indicator_code
            ),
            Err(e) => error!("Error fetching indicator {}: {}", indicator_code, e),
        }
        result
    }
}

/// Extract the observation list from a `[metadata, observations]` payload.
pub fn parse_payload(url: &str, body: &str) -> Result<Vec<Observation>, FetchError> {
    let decode = |message: String| FetchError::Decode {
        url: url.to_string(),
        message,
    };

    let payload: Value = serde_json::from_str(body).map_err(|e| decode(e.to_string()))?;
    let Value::Array(elements) = payload else {
        return Err(decode("expected a top-level JSON array".to_string()));
    };

    match elements.into_iter().nth(1) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(data) => serde_json::from_value(data).map_err(|e| decode(e.to_string())),
    }
}
