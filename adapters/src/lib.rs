//! Core `adapters` crate for abstracting outbound repository-host lookups.
//!
//! This crate defines the `RepositoryHost` trait, which outlines the single
//! query the profile service makes against a source-hosting provider, and
//! provides the concrete GitHub implementation.

pub mod errors;
pub mod github;
pub mod models;

use async_trait::async_trait;

pub use errors::AdapterError;
pub use github::{GithubClient, GithubCredentials};
pub use models::HostResponse;

/// A source-hosting provider that can list a user's repositories.
///
/// Implementations relay the provider's reply as-is: a non-success status is
/// not an error at this layer, only failures to reach the provider are.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Fetches the most recently created repositories of `username`.
    async fn recent_repositories(&self, username: &str) -> Result<HostResponse, AdapterError>;
}
