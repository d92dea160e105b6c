//! # Indicator Dashboard Backend
//!
//! Authenticated backend for a small economic indicators dashboard.
//!
//! The backend fetches two indicators (population growth and GDP per capita)
//! from the World Bank API for a fixed set of countries and years, merges them
//! into one series per country and serves the result to a logged-in browser
//! client.
//!
//! ## Architecture
//!
//! - [`models`]: raw observations and the merged per-country series
//! - [`services`]: indicator fetcher, merge, and per-request orchestration
//! - [`auth`]: user directory, password hashing and session tokens
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Merge rules
//!
//! Population data anchors the join. GDP values only fill years that already
//! have a population value, countries without any population value are
//! dropped, and the result is sorted by country name.

pub mod auth;
pub mod config;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
