//! Session gate: user lookup, password checks and signed session tokens.
//!
//! The HTTP layer only sees [`UserDirectory`] (credentials to identity) and
//! [`SessionTokens`] (identity to bearer token and back). The dashboard
//! pipeline never looks at credentials.

pub mod directory;
pub mod error;
pub mod tokens;

use serde::{Deserialize, Serialize};

pub use directory::{InMemoryUserDirectory, UserDirectory};
pub use error::AuthError;
pub use tokens::{Claims, SessionTokens};

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
}

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
