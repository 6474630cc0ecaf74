//! Database query functions (Data Access Objects).
//!
//! This module centralizes all direct MongoDB operations behind the
//! `ProfileStore` trait, keeping the query documents out of the services and
//! API handlers.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::{options::ReturnDocument, Client, Collection, Database};
use tracing::info;

use super::{
    models::{PopulatedProfile, Profile, ProfileUpdate, SubRecords},
    ProfileStore, StoreError, PROFILES, USERS,
};

#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database);

        database.run_command(doc! { "ping": 1 }).await?;
        info!(database = %database.name(), "MongoDB connected");

        Ok(Self { database })
    }

    fn profiles(&self) -> Collection<Profile> {
        self.database.collection(PROFILES)
    }

    fn users(&self) -> Collection<Document> {
        self.database.collection(USERS)
    }

    async fn populated(&self, filter: Document) -> Result<Vec<PopulatedProfile>, StoreError> {
        let documents: Vec<Document> = self
            .database
            .collection::<Document>(PROFILES)
            .aggregate(population_pipeline(filter))
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(|document| bson::from_document(document).map_err(StoreError::from))
            .collect()
    }
}

/// Profile fields kept by the population projection, next to the joined
/// user's id, name and avatar.
const PROFILE_FIELDS: [&str; 11] = [
    "company",
    "website",
    "location",
    "bio",
    "status",
    "githubusername",
    "skills",
    "social",
    "experience",
    "education",
    "date",
];

/// Joins each profile's `user` reference with that user's name and avatar.
fn population_pipeline(filter: Document) -> Vec<Document> {
    let mut projection = doc! {
        "_id": 1,
        "user._id": 1,
        "user.name": 1,
        "user.avatar": 1,
    };
    for field in PROFILE_FIELDS {
        projection.insert(field, 1);
    }

    vec![
        doc! { "$match": filter },
        doc! {
            "$lookup": {
                "from": USERS,
                "localField": "user",
                "foreignField": "_id",
                "as": "user",
            }
        },
        doc! {
            "$unwind": { "path": "$user", "preserveNullAndEmptyArrays": true }
        },
        doc! { "$project": projection },
    ]
}

#[async_trait]
impl ProfileStore for MongoStore {
    async fn find_by_user(&self, user: ObjectId) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles().find_one(doc! { "user": user }).await?)
    }

    async fn find_populated_by_user(
        &self,
        user: ObjectId,
    ) -> Result<Option<PopulatedProfile>, StoreError> {
        Ok(self.populated(doc! { "user": user }).await?.into_iter().next())
    }

    async fn find_all_populated(&self) -> Result<Vec<PopulatedProfile>, StoreError> {
        self.populated(Document::new()).await
    }

    async fn apply_update(
        &self,
        user: ObjectId,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, StoreError> {
        if update.is_empty() {
            return self.find_by_user(user).await;
        }

        Ok(self
            .profiles()
            .find_one_and_update(doc! { "user": user }, update.to_update_document())
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        self.profiles().insert_one(profile).await?;
        Ok(())
    }

    async fn replace_sub_records(
        &self,
        profile: ObjectId,
        records: &SubRecords,
    ) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .profiles()
            .find_one_and_update(doc! { "_id": profile }, records.to_update_document()?)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_profile(&self, user: ObjectId) -> Result<(), StoreError> {
        self.profiles().delete_one(doc! { "user": user }).await?;
        Ok(())
    }

    async fn delete_user(&self, user: ObjectId) -> Result<(), StoreError> {
        self.users().delete_one(doc! { "_id": user }).await?;
        Ok(())
    }
}
