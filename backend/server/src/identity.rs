//! # Admin Gate
//!
//! Sign-in itself happens with the identity provider in the browser. The server only sees the
//! credential the dashboard forwards as `Authorization: Bearer <token>`.
//!
//! - Token configured: admin routes need it, anything else is a 401
//! - No token configured: every caller is let through and startup logs a warning
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::{error::AppError, state::AppState};

/// Proof that the request may call admin operations.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl Admin {
    pub fn verify(expected: Option<&str>, authorization: Option<&str>) -> Result<Self, AppError> {
        let Some(expected) = expected else {
            return Ok(Admin);
        };

        match authorization.and_then(|value| value.strip_prefix("Bearer ")) {
            Some(token) if token.trim() == expected => Ok(Admin),
            _ => {
                warn!("Rejected admin request with missing or wrong token");
                Err(AppError::Unauthorized)
            }
        }
    }
}

impl FromRequestParts<Arc<AppState>> for Admin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        Admin::verify(state.config.admin_token.as_deref(), authorization)
    }
}
