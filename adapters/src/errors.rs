//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while building or sending a
//! request to a repository host, or while reading its reply.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
