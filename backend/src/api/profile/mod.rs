//! Module for the profile API.
//!
//! This module handles the endpoints that read and write a user's profile,
//! its experience and education entries, and the GitHub repository lookup.

pub mod handlers;
pub mod models;
pub mod payloads;
pub mod routes;

pub use routes::profile_router;
