//! Data Transfer Objects for the HTTP API.
//!
//! The dashboard payload itself is `Vec<CountrySeries>`, re-exported here
//! from the models since it already derives Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::models::{CountrySeries, YearPoint};

/// Request body for `POST /api/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
