//! Identity extractors
//!
//! Both read what [`authenticate`](super::middleware::authenticate) stored in
//! the request extensions.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use crate::auth::{CurrentUser, Identity};
use crate::security_log;

/// Requires an authenticated caller (401 otherwise)
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentUser>() {
            Some(user) => Ok(user.clone()),
            None => {
                security_log!("WARN", "auth_missing", uri = parts.uri.to_string());
                Err(AppError::not_authenticated())
            }
        }
    }
}

/// Never rejects; anonymous callers become [`Identity::Anonymous`]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map_or(Identity::Anonymous, Identity::Authenticated))
    }
}
