//! Authentication module for resolving the caller of protected endpoints.
//!
//! This module provides the token verification service, the claims carried
//! by access tokens, and the extractor that guards authenticated routes.
//! Issuing tokens at login belongs to the account subsystem.

pub mod errors;
pub mod middleware;
pub mod models;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use middleware::*;
pub use models::*;
pub use service::*;
