//! Module for core business logic services.
//!
//! This module encapsulates the services that perform profile operations and
//! orchestrate interactions between the store and outbound adapters, so the
//! API handlers stay thin.

pub mod profile_manager;
pub mod repo_lookup;

pub use profile_manager::{ProfileError, ProfileManager};
pub use repo_lookup::{LookupError, RepoLookup};
