//! Authentication middleware
//!
//! Resolves the optional bearer token into a [`CurrentUser`] with fresh group
//! memberships and stores it in the request extensions. Requests without an
//! `Authorization` header pass through as anonymous; the handlers decide
//! whether that is acceptable.
//!
//! | Case | Result |
//! |------|--------|
//! | No header | anonymous |
//! | Malformed header / bad token | 401 TokenInvalid |
//! | Expired token | 401 TokenExpired |
//! | User no longer exists | 401 TokenInvalid |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;

pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let Some(header) = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .map(|h| h.to_str().unwrap_or_default().to_string())
    else {
        return Ok(next.run(req).await);
    };

    let token = JwtService::extract_from_header(&header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = e.to_string(),
            uri = req.uri().to_string()
        );
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let user_id = claims
        .user_id()
        .map_err(|_| AppError::invalid_token("Invalid token"))?;

    let info = user::find_info(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            security_log!("WARN", "auth_unknown_user", user_id = user_id);
            AppError::invalid_token("User no longer exists")
        })?;

    req.extensions_mut().insert(CurrentUser::from(info));
    Ok(next.run(req).await)
}
