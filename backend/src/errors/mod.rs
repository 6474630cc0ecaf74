//! Global application error types and handlers.
//!
//! This module defines the HTTP-facing `AppError`, its conversion into JSON
//! responses, and the errors that can abort server start-up.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use crate::{
    auth::AuthError, config::ConfigError, database::StoreError,
    services::profile_manager::ProfileError,
};

pub const SERVER_ERROR: &str = "Server Error";

/// One failing request field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    pub fn new(param: &str, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: param.to_string(),
            location: "body",
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("No Github Profile Found")]
    GithubNotFound,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "msg": msg }))).into_response()
            }
            AppError::GithubNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "msg": AppError::GithubNotFound.to_string() })),
            )
                .into_response(),
            AppError::Auth(err) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "msg": err.to_string() }))).into_response()
            }
            AppError::Internal(detail) => {
                error!(%detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR).into_response()
            }
        }
    }
}

/// Failures that stop the server before it accepts connections.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] StoreError),

    #[error(transparent)]
    Adapter(#[from] adapters::AdapterError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
