//! In-process `ProfileStore` with the same semantics as the MongoDB store.
//!
//! Used when no `MONGO_URI` is configured and by the test suite. Each trait
//! call takes one lock, matching MongoDB's single-document atomicity.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{
    models::{PopulatedProfile, Profile, ProfileUpdate, SubRecords, UserSummary},
    ProfileStore, StoreError,
};

#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<Vec<Profile>>,
    users: RwLock<HashMap<ObjectId, UserSummary>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user document, standing in for the account subsystem.
    pub async fn add_user(&self, name: &str, avatar: &str) -> ObjectId {
        let user = UserSummary {
            id: ObjectId::new(),
            name: name.to_string(),
            avatar: avatar.to_string(),
        };
        let id = user.id;
        self.users.write().await.insert(id, user);
        id
    }

    pub async fn has_user(&self, id: ObjectId) -> bool {
        self.users.read().await.contains_key(&id)
    }

    pub async fn profile_count(&self, user: ObjectId) -> usize {
        self.profiles
            .read()
            .await
            .iter()
            .filter(|profile| profile.user == user)
            .count()
    }

    async fn populate(&self, profiles: Vec<Profile>) -> Vec<PopulatedProfile> {
        let users = self.users.read().await;

        profiles
            .into_iter()
            .map(|profile| {
                let user = users.get(&profile.user).cloned();
                profile.populate(user)
            })
            .collect()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_user(&self, user: ObjectId) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .find(|profile| profile.user == user)
            .cloned())
    }

    async fn find_populated_by_user(
        &self,
        user: ObjectId,
    ) -> Result<Option<PopulatedProfile>, StoreError> {
        let found = self.find_by_user(user).await?;
        Ok(self.populate(found.into_iter().collect()).await.pop())
    }

    async fn find_all_populated(&self) -> Result<Vec<PopulatedProfile>, StoreError> {
        let profiles = self.profiles.read().await.clone();
        Ok(self.populate(profiles).await)
    }

    async fn apply_update(
        &self,
        user: ObjectId,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, StoreError> {
        let mut profiles = self.profiles.write().await;

        Ok(profiles
            .iter_mut()
            .find(|profile| profile.user == user)
            .map(|profile| {
                update.apply(profile);
                profile.clone()
            }))
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        self.profiles.write().await.push(profile.clone());
        Ok(())
    }

    async fn replace_sub_records(
        &self,
        profile: ObjectId,
        records: &SubRecords,
    ) -> Result<Option<Profile>, StoreError> {
        let mut profiles = self.profiles.write().await;

        Ok(profiles
            .iter_mut()
            .find(|stored| stored.id == profile)
            .map(|stored| {
                records.apply(stored);
                stored.clone()
            }))
    }

    async fn delete_profile(&self, user: ObjectId) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;

        if let Some(index) = profiles.iter().position(|profile| profile.user == user) {
            profiles.remove(index);
        }

        Ok(())
    }

    async fn delete_user(&self, user: ObjectId) -> Result<(), StoreError> {
        self.users.write().await.remove(&user);
        Ok(())
    }
}
