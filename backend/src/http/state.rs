//! Application state for the HTTP server.

use std::sync::Arc;

use crate::auth::{SessionTokens, UserDirectory};
use crate::config::AppConfig;
use crate::services::IndicatorSource;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where indicator observations come from
    pub source: Arc<dyn IndicatorSource>,
    /// Credential lookup for login
    pub users: Arc<dyn UserDirectory>,
    /// Token issuing and verification
    pub sessions: Arc<SessionTokens>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create the application state; session tokens are derived from `config.auth`.
    pub fn new(
        config: AppConfig,
        source: Arc<dyn IndicatorSource>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        let sessions = SessionTokens::new(&config.auth.jwt_secret, config.auth.token_ttl_secs);
        Self {
            source,
            users,
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }
}
