//! Custom error types specific to authentication failures.
//!
//! The display strings double as the `msg` sent back with the 401 response.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No token, authorization denied")]
    MissingToken,

    #[error("Token is not valid")]
    InvalidToken,

    #[error("Token could not be signed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
