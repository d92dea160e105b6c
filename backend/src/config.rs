//! Application configuration file support.
//!
//! Configuration is read from a TOML file (`dashboard.toml`) and then
//! overridden by a handful of environment variables. Every setting has a
//! default, so the server starts without any file present.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::aggregator::DuplicateYears;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub aggregation: AggregationSettings,
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the browser client, served for unmatched paths.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// Indicator source settings: where to fetch from and which slice to fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_end_year")]
    pub end_year: i32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_population_code")]
    pub population_code: String,
    #[serde(default = "default_gdp_code")]
    pub gdp_code: String,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            countries: default_countries(),
            start_year: default_start_year(),
            end_year: default_end_year(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
            population_code: default_population_code(),
            gdp_code: default_gdp_code(),
        }
    }
}

impl IndicatorSettings {
    /// Country ids joined the way the source expects them, e.g. `USA;CHN;IND`.
    pub fn country_path(&self) -> String {
        self.countries.join(";")
    }

    /// Year window as `start:end`.
    pub fn date_range(&self) -> String {
        format!("{}:{}", self.start_year, self.end_year)
    }
}

/// Session and user settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// No built-in value; must come from the file or `JWT_SECRET`.
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default = "default_username")]
    pub default_username: String,
    #[serde(default = "default_password")]
    pub default_password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl_secs(),
            bcrypt_cost: default_bcrypt_cost(),
            default_username: default_username(),
            default_password: default_password(),
        }
    }
}

/// Merge settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationSettings {
    #[serde(default)]
    pub duplicate_years: DuplicateYears,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_base_url() -> String {
    "https://api.worldbank.org".to_string()
}

fn default_countries() -> Vec<String> {
    vec!["USA".to_string(), "CHN".to_string(), "IND".to_string()]
}

fn default_start_year() -> i32 {
    2018
}

fn default_end_year() -> i32 {
    2022
}

fn default_per_page() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_population_code() -> String {
    "SP.POP.GROW".to_string()
}

fn default_gdp_code() -> String {
    "NY.GDP.PCAP.CD".to_string()
}

fn default_token_ttl_secs() -> i64 {
    3600
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_username() -> String {
    "testuser".to_string()
}

fn default_password() -> String {
    "password123".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location, falling back to defaults.
    ///
    /// Searches for `dashboard.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                tracing::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        tracing::info!("No dashboard.toml found, using built-in defaults");
        Ok(Self::default())
    }

    /// Full startup load: file (or defaults), process environment, validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_default_location()?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Recognized keys: `HOST`, `PORT`, `JWT_SECRET`, `INDICATOR_BASE_URL`,
    /// `STATIC_DIR`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| {
                    ConfigError::Invalid(format!(
                        "PORT must be a valid port number, got '{}'",
                        port
                    ))
                })?;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(base_url) = lookup("INDICATOR_BASE_URL") {
            self.indicators.base_url = base_url;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let indicators = &self.indicators;
        if indicators.countries.is_empty() {
            return Err(ConfigError::Invalid(
                "indicators.countries must list at least one country".to_string(),
            ));
        }
        if indicators.start_year > indicators.end_year {
            return Err(ConfigError::Invalid(format!(
                "indicators.start_year ({}) is after end_year ({})",
                indicators.start_year, indicators.end_year
            )));
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid(
                "auth.jwt_secret is not set; set it in dashboard.toml or via JWT_SECRET"
                    .to_string(),
            ));
        }
        if self.auth.token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid("auth.token_ttl_secs must be positive".to_string()));
        }
        Ok(())
    }
}
