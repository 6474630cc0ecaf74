//! Central module for organizing the application's API endpoints.
//!
//! This module acts as a top-level container for the API domains. Token
//! checks live in `auth` and are applied by the handlers that need them.

pub mod profile;
