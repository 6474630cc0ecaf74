//! Guard for authenticated routes.
//!
//! `AuthUser` is an axum extractor: handlers that take it as an argument only
//! run once the `x-auth-token` header has been verified.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, AuthUser};
use crate::{errors::AppError, AppState};

pub const TOKEN_HEADER: &str = "x-auth-token";

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let claims = state.tokens.verify(token)?;

        Ok(AuthUser { id: claims.user.id })
    }
}
