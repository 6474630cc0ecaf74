//! Module for database connection setup and common utilities.
//!
//! This module defines the `ProfileStore` trait every storage backend
//! implements, the storage error taxonomy, and the identifier parsing shared
//! by the MongoDB and in-memory stores.

pub mod memory;
pub mod models;
pub mod queries;

use async_trait::async_trait;
use bson::oid::ObjectId;
use thiserror::Error;

pub use memory::MemoryStore;
pub use queries::MongoStore;

use models::{PopulatedProfile, Profile, ProfileUpdate, SubRecords};

pub const PROFILES: &str = "profiles";
pub const USERS: &str = "users";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Malformed identifier: {0}")]
    MalformedId(String),

    #[error("Database error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Failed to decode document: {0}")]
    Decode(#[from] bson::de::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),
}

/// Parses a 24-character hex identifier.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(raw).map_err(|_| StoreError::MalformedId(raw.to_string()))
}

/// Profile persistence. Each method is a single round trip; callers compose
/// them without any isolation between calls.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_user(&self, user: ObjectId) -> Result<Option<Profile>, StoreError>;

    async fn find_populated_by_user(
        &self,
        user: ObjectId,
    ) -> Result<Option<PopulatedProfile>, StoreError>;

    async fn find_all_populated(&self) -> Result<Vec<PopulatedProfile>, StoreError>;

    /// Applies `update` to the user's profile and returns the updated document.
    async fn apply_update(
        &self,
        user: ObjectId,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, StoreError>;

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Overwrites one sub-record sequence of the profile with id `profile`,
    /// leaving its other fields as stored, and returns the updated document.
    async fn replace_sub_records(
        &self,
        profile: ObjectId,
        records: &SubRecords,
    ) -> Result<Option<Profile>, StoreError>;

    async fn delete_profile(&self, user: ObjectId) -> Result<(), StoreError>;

    async fn delete_user(&self, user: ObjectId) -> Result<(), StoreError>;
}
