//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::auth::AuthError;
use crate::services::DashboardError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Internal server error
    Internal(String),
    /// Login or bearer token failure
    Auth(AuthError),
    /// Indicator data could not be assembled
    Dashboard(DashboardError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", msg),
                )
            }
            AppError::Auth(AuthError::MissingToken) => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHORIZED", "Authentication token required."),
            ),
            AppError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHORIZED", "Invalid credentials."),
            ),
            AppError::Auth(AuthError::InvalidToken(e)) => {
                warn!("Rejected bearer token: {}", e);
                (
                    StatusCode::FORBIDDEN,
                    ApiError::new("FORBIDDEN", "Invalid token."),
                )
            }
            AppError::Auth(e) => {
                error!("Session error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", "Could not create a session."),
                )
            }
            AppError::Dashboard(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(
                    "UPSTREAM_UNAVAILABLE",
                    "Failed to fetch data from the World Bank API.",
                )
                .with_details(e.to_string()),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        AppError::Dashboard(err)
    }
}
