//! Manages profile documents on behalf of the API handlers.
//!
//! This module composes the store calls behind each profile operation:
//! retrieval with population, create-or-update, account deletion, and the
//! experience/education sub-record edits.

use std::sync::Arc;

use bson::oid::ObjectId;
use thiserror::Error;
use tracing::{debug, info};

use crate::database::{
    models::{Education, Experience, PopulatedProfile, Profile, ProfileUpdate, SubRecord},
    parse_object_id, ProfileStore, StoreError,
};

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("There is no profile for this user")]
    NoProfile,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Adds `entry` at the front of `entries`.
pub fn prepend<T>(entries: &mut Vec<T>, entry: T) {
    entries.insert(0, entry);
}

/// Removes the entry whose id matches `id`. When nothing matches, the lookup
/// yields the not-found sentinel and the trailing entry is removed instead.
pub fn splice_out<T: SubRecord>(entries: &mut Vec<T>, id: &str) -> Option<T> {
    match entries.iter().position(|entry| entry.id().to_hex() == id) {
        Some(index) => Some(entries.remove(index)),
        None => entries.pop(),
    }
}

pub struct ProfileManager {
    store: Arc<dyn ProfileStore>,
}

impl ProfileManager {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn own_profile(&self, user_id: &str) -> Result<Option<PopulatedProfile>, ProfileError> {
        let user = parse_object_id(user_id)?;
        Ok(self.store.find_populated_by_user(user).await?)
    }

    pub async fn all_profiles(&self) -> Result<Vec<PopulatedProfile>, ProfileError> {
        Ok(self.store.find_all_populated().await?)
    }

    /// A malformed `user_id` surfaces as `StoreError::MalformedId`.
    pub async fn profile_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<PopulatedProfile>, ProfileError> {
        self.own_profile(user_id).await
    }

    /// Creates the caller's profile, or applies `update` to the existing one.
    ///
    /// The existence check and the write are separate round trips, so two
    /// concurrent first upserts for one user can both insert.
    pub async fn upsert(&self, user_id: &str, update: ProfileUpdate) -> Result<Profile, ProfileError> {
        let user = parse_object_id(user_id)?;

        if self.store.find_by_user(user).await?.is_some() {
            debug!(%user, "updating profile");
            return self
                .store
                .apply_update(user, &update)
                .await?
                .ok_or(ProfileError::NoProfile);
        }

        let profile = update.into_profile(user);
        self.store.insert(&profile).await?;
        info!(%user, profile = %profile.id, "created profile");

        Ok(profile)
    }

    /// Deletes the caller's profile, then the caller's user document. The
    /// two deletes are independent: if the second fails the first stays done.
    pub async fn delete_account(&self, user_id: &str) -> Result<(), ProfileError> {
        let user = parse_object_id(user_id)?;

        self.store.delete_profile(user).await?;
        self.store.delete_user(user).await?;
        info!(%user, "removed profile and user");

        Ok(())
    }

    pub async fn add_experience(
        &self,
        user_id: &str,
        experience: Experience,
    ) -> Result<Profile, ProfileError> {
        self.edit(user_id, |entries: &mut Vec<Experience>| prepend(entries, experience))
            .await
    }

    pub async fn remove_experience(&self, user_id: &str, exp_id: &str) -> Result<Profile, ProfileError> {
        self.edit(user_id, |entries: &mut Vec<Experience>| {
            if let Some(removed) = splice_out(entries, exp_id) {
                debug!(requested = %exp_id, removed = %removed.id, "removed experience");
            }
        })
        .await
    }

    pub async fn add_education(
        &self,
        user_id: &str,
        education: Education,
    ) -> Result<Profile, ProfileError> {
        self.edit(user_id, |entries: &mut Vec<Education>| prepend(entries, education))
            .await
    }

    pub async fn remove_education(&self, user_id: &str, edu_id: &str) -> Result<Profile, ProfileError> {
        self.edit(user_id, |entries: &mut Vec<Education>| {
            if let Some(removed) = splice_out(entries, edu_id) {
                debug!(requested = %edu_id, removed = %removed.id, "removed education");
            }
        })
        .await
    }

    /// Loads the caller's profile, applies `change` to one of its sub-record
    /// sequences, and writes back only that sequence.
    async fn edit<T, F>(&self, user_id: &str, change: F) -> Result<Profile, ProfileError>
    where
        T: SubRecord + Send,
        F: FnOnce(&mut Vec<T>) + Send,
    {
        let user: ObjectId = parse_object_id(user_id)?;
        let mut profile = self
            .store
            .find_by_user(user)
            .await?
            .ok_or(ProfileError::NoProfile)?;

        let mut entries = std::mem::take(T::entries_mut(&mut profile));
        change(&mut entries);

        self.store
            .replace_sub_records(profile.id, &T::into_records(entries))
            .await?
            .ok_or(ProfileError::NoProfile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{
        models::{SubRecords, UserSummary},
        MemoryStore,
    };
    use async_trait::async_trait;
    use bson::DateTime;

    /// Delegates to a `MemoryStore`, but lands an upsert for `user` right
    /// before each sub-record write, as a concurrent request would.
    struct UpsertBeforeWrite {
        inner: Arc<MemoryStore>,
        user: ObjectId,
        update: ProfileUpdate,
    }

    #[async_trait]
    impl ProfileStore for UpsertBeforeWrite {
        async fn find_by_user(&self, user: ObjectId) -> Result<Option<Profile>, StoreError> {
            self.inner.find_by_user(user).await
        }

        async fn find_populated_by_user(
            &self,
            user: ObjectId,
        ) -> Result<Option<PopulatedProfile>, StoreError> {
            self.inner.find_populated_by_user(user).await
        }

        async fn find_all_populated(&self) -> Result<Vec<PopulatedProfile>, StoreError> {
            self.inner.find_all_populated().await
        }

        async fn apply_update(
            &self,
            user: ObjectId,
            update: &ProfileUpdate,
        ) -> Result<Option<Profile>, StoreError> {
            self.inner.apply_update(user, update).await
        }

        async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
            self.inner.insert(profile).await
        }

        async fn replace_sub_records(
            &self,
            profile: ObjectId,
            records: &SubRecords,
        ) -> Result<Option<Profile>, StoreError> {
            self.inner.apply_update(self.user, &self.update).await?;
            self.inner.replace_sub_records(profile, records).await
        }

        async fn delete_profile(&self, user: ObjectId) -> Result<(), StoreError> {
            self.inner.delete_profile(user).await
        }

        async fn delete_user(&self, user: ObjectId) -> Result<(), StoreError> {
            self.inner.delete_user(user).await
        }
    }

    fn experience(title: &str) -> Experience {
        Experience {
            id: ObjectId::new(),
            title: title.into(),
            company: "Acme".into(),
            location: None,
            from: DateTime::now(),
            to: None,
            current: false,
            description: None,
        }
    }

    fn education(school: &str) -> Education {
        Education {
            id: ObjectId::new(),
            school: school.into(),
            degree: "BSc".into(),
            fieldofstudy: "CS".into(),
            location: None,
            from: DateTime::now(),
            to: None,
            current: true,
            description: None,
        }
    }

    fn update(status: &str, skills: &[&str]) -> ProfileUpdate {
        ProfileUpdate {
            status: Some(status.into()),
            skills: Some(skills.iter().map(|s| s.to_string()).collect()),
            ..ProfileUpdate::default()
        }
    }

    async fn manager_with_user() -> (ProfileManager, Arc<MemoryStore>, String) {
        let store = Arc::new(MemoryStore::new());
        let user = store.add_user("Ada", "//avatar").await;
        (ProfileManager::new(store.clone()), store, user.to_hex())
    }

    #[test]
    fn splice_out_removes_the_matching_entry() {
        let mut entries = vec![experience("a"), experience("b"), experience("c")];
        let target = entries[1].id.to_hex();

        let removed = splice_out(&mut entries, &target).unwrap();

        assert_eq!(removed.title, "b");
        assert_eq!(
            entries.iter().map(|e| e.title.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn splice_out_miss_drops_the_last_entry() {
        let mut entries = vec![experience("a"), experience("b")];

        let removed = splice_out(&mut entries, &ObjectId::new().to_hex()).unwrap();

        assert_eq!(removed.title, "b");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "a");
    }

    #[test]
    fn splice_out_on_empty_is_a_no_op() {
        let mut entries: Vec<Experience> = Vec::new();
        assert!(splice_out(&mut entries, "anything").is_none());
    }

    #[tokio::test]
    async fn upsert_twice_keeps_one_profile() {
        let (manager, store, user) = manager_with_user().await;

        let first = manager
            .upsert(
                &user,
                ProfileUpdate {
                    company: Some("Acme".into()),
                    ..update("Junior", &["js"])
                },
            )
            .await
            .unwrap();
        let second = manager.upsert(&user, update("Senior", &["rust", "go"])).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status.as_deref(), Some("Senior"));
        assert_eq!(second.skills, vec!["rust", "go"]);
        assert_eq!(second.company.as_deref(), Some("Acme"));
        assert_eq!(store.profile_count(parse_object_id(&user).unwrap()).await, 1);
    }

    #[tokio::test]
    async fn own_profile_appears_after_upsert() {
        let (manager, _, user) = manager_with_user().await;
        assert!(manager.own_profile(&user).await.unwrap().is_none());

        manager.upsert(&user, update("Dev", &["rust"])).await.unwrap();

        let profile = manager.own_profile(&user).await.unwrap().unwrap();
        assert_eq!(
            profile.user,
            Some(UserSummary {
                id: parse_object_id(&user).unwrap(),
                name: "Ada".into(),
                avatar: "//avatar".into(),
            })
        );
    }

    #[tokio::test]
    async fn malformed_user_id_is_reported_as_such() {
        let (manager, _, _) = manager_with_user().await;

        let err = manager.profile_by_user("not-an-id").await.unwrap_err();
        assert!(matches!(err, ProfileError::Store(StoreError::MalformedId(_))));
    }

    #[tokio::test]
    async fn experience_is_prepended_and_persisted() {
        let (manager, _, user) = manager_with_user().await;
        manager.upsert(&user, update("Dev", &["rust"])).await.unwrap();

        manager.add_experience(&user, experience("first")).await.unwrap();
        let profile = manager.add_experience(&user, experience("second")).await.unwrap();
        assert_eq!(profile.experience[0].title, "second");

        let stored = manager.own_profile(&user).await.unwrap().unwrap();
        assert_eq!(
            stored.experience.iter().map(|e| e.title.as_str()).collect::<Vec<_>>(),
            vec!["second", "first"]
        );
    }

    #[tokio::test]
    async fn removing_education_by_id_and_by_miss() {
        let (manager, _, user) = manager_with_user().await;
        manager.upsert(&user, update("Dev", &["rust"])).await.unwrap();
        manager.add_education(&user, education("oldest")).await.unwrap();
        manager.add_education(&user, education("middle")).await.unwrap();
        let profile = manager.add_education(&user, education("newest")).await.unwrap();

        let middle = profile.education[1].id.to_hex();
        let profile = manager.remove_education(&user, &middle).await.unwrap();
        assert_eq!(
            profile.education.iter().map(|e| e.school.as_str()).collect::<Vec<_>>(),
            vec!["newest", "oldest"]
        );

        let profile = manager.remove_education(&user, "missing").await.unwrap();
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].school, "newest");
    }

    #[tokio::test]
    async fn sub_record_edit_keeps_a_concurrent_upsert() {
        let inner = Arc::new(MemoryStore::new());
        let user = inner.add_user("Ada", "").await;
        let manager = ProfileManager::new(Arc::new(UpsertBeforeWrite {
            inner: inner.clone(),
            user,
            update: update("Lead", &["rust"]),
        }));
        let user_id = user.to_hex();
        manager.upsert(&user_id, update("Dev", &["rust"])).await.unwrap();

        let returned = manager.add_experience(&user_id, experience("first")).await.unwrap();
        assert_eq!(returned.status.as_deref(), Some("Lead"));

        let stored = inner.find_by_user(user).await.unwrap().unwrap();
        assert_eq!(stored.status.as_deref(), Some("Lead"));
        assert_eq!(stored.experience.len(), 1);
        assert_eq!(stored.experience[0].title, "first");

        let with_school = manager.add_education(&user_id, education("MIT")).await.unwrap();
        let removed = manager
            .remove_education(&user_id, &with_school.education[0].id.to_hex())
            .await
            .unwrap();
        assert!(removed.education.is_empty());
        assert_eq!(removed.experience.len(), 1);
        assert_eq!(removed.status.as_deref(), Some("Lead"));
    }

    #[tokio::test]
    async fn sub_record_edits_need_a_profile() {
        let (manager, _, user) = manager_with_user().await;

        let err = manager.add_experience(&user, experience("x")).await.unwrap_err();
        assert!(matches!(err, ProfileError::NoProfile));
    }

    #[tokio::test]
    async fn delete_account_removes_profile_and_user() {
        let (manager, store, user) = manager_with_user().await;
        manager.upsert(&user, update("Dev", &["rust"])).await.unwrap();

        manager.delete_account(&user).await.unwrap();

        let id = parse_object_id(&user).unwrap();
        assert!(manager.profile_by_user(&user).await.unwrap().is_none());
        assert!(!store.has_user(id).await);
    }
}
