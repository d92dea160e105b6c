//! Error types for the session gate.

/// Authentication and session failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer token was presented.
    #[error("Authentication token required.")]
    MissingToken,

    /// Token failed signature, format or expiry checks.
    #[error("Invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Unknown user or wrong password.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
