//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! session gate or the service layer.

use axum::{extract::State, Json};
use tracing::info;

use super::dto::{CountrySeries, HealthResponse, LoginRequest, LoginResponse};
use super::error::AppError;
use super::extract::AuthenticatedUser;
use super::state::AppState;
use crate::auth::AuthError;
use crate::services::load_dashboard;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

// =============================================================================
// Session
// =============================================================================

/// POST /api/login
///
/// Check credentials and hand out a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<LoginResponse> {
    let users = state.users.clone();
    let LoginRequest { username, password } = request;

    // bcrypt is CPU-bound, keep it off the async workers
    let identity = tokio::task::spawn_blocking(move || users.authenticate(&username, &password))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .ok_or(AuthError::InvalidCredentials)?;

    let token = state.sessions.issue(&identity)?;
    info!(user = %identity.username, "Issued session token");

    Ok(Json(LoginResponse { token }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /api/dashboard-data
///
/// Merged population growth and GDP per capita series, one entry per country.
pub async fn dashboard_data(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> HandlerResult<Vec<CountrySeries>> {
    info!(user = %identity.username, "Dashboard data requested");

    let data = load_dashboard(
        state.source.as_ref(),
        &state.config.indicators,
        state.config.aggregation.duplicate_years,
    )
    .await?;

    Ok(Json(data))
}
