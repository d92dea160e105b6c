//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::error::AppError;
use super::state::AppState;
use crate::auth::{AuthError, Identity};

/// Caller identity taken from a valid `Authorization: Bearer <token>` header.
///
/// Handlers that take this extractor never run for unauthenticated requests:
/// a missing token is rejected with 401, a bad or expired one with 403.
/// The scheme word is not checked, so `Basic xyz` is verified as a token
/// and fails with 403.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;
        let identity = state.sessions.verify(token)?;
        Ok(Self(identity))
    }
}

/// Second word of the authorization header (`<scheme> <token>`), if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (_scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_present() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn test_bearer_token_absent_or_malformed() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
    }

    #[test]
    fn test_bearer_token_other_scheme_is_still_extracted() {
        assert_eq!(
            bearer_token(&headers("Basic dXNlcjpwYXNz")),
            Some("dXNlcjpwYXNz")
        );
    }
}
