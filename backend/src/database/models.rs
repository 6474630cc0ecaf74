//! Rust structs that represent the stored document shapes.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from MongoDB. They differ from the API-facing models in `api::profile::models`,
//! which render identifiers and dates as strings.

use bson::{doc, oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    fn entries(&self) -> [(&'static str, &Option<String>); 5] {
        [
            ("youtube", &self.youtube),
            ("twitter", &self.twitter),
            ("facebook", &self.facebook),
            ("linkedin", &self.linkedin),
            ("instagram", &self.instagram),
        ]
    }

    /// Overwrites only the links that are set on `other`.
    pub fn merge(&mut self, other: &Social) {
        let targets = [
            (&mut self.youtube, &other.youtube),
            (&mut self.twitter, &other.twitter),
            (&mut self.facebook, &other.facebook),
            (&mut self.linkedin, &other.linkedin),
            (&mut self.instagram, &other.instagram),
        ];

        for (slot, value) in targets {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An entry embedded in one of a profile's ordered sequences.
pub trait SubRecord: Sized {
    fn id(&self) -> ObjectId;

    /// The sequence of `profile` this kind of entry lives in.
    fn entries_mut(profile: &mut Profile) -> &mut Vec<Self>;

    fn into_records(entries: Vec<Self>) -> SubRecords;
}

impl SubRecord for Experience {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn entries_mut(profile: &mut Profile) -> &mut Vec<Self> {
        &mut profile.experience
    }

    fn into_records(entries: Vec<Self>) -> SubRecords {
        SubRecords::Experience(entries)
    }
}

impl SubRecord for Education {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn entries_mut(profile: &mut Profile) -> &mut Vec<Self> {
        &mut profile.education
    }

    fn into_records(entries: Vec<Self>) -> SubRecords {
        SubRecords::Education(entries)
    }
}

/// A complete replacement for one of a profile's sub-record sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum SubRecords {
    Experience(Vec<Experience>),
    Education(Vec<Education>),
}

impl SubRecords {
    pub fn field(&self) -> &'static str {
        match self {
            SubRecords::Experience(_) => "experience",
            SubRecords::Education(_) => "education",
        }
    }

    /// `$set` of this sequence alone, leaving every other field as stored.
    pub fn to_update_document(&self) -> Result<Document, bson::ser::Error> {
        let entries = match self {
            SubRecords::Experience(entries) => bson::to_bson(entries)?,
            SubRecords::Education(entries) => bson::to_bson(entries)?,
        };

        let mut set = Document::new();
        set.insert(self.field(), entries);
        Ok(doc! { "$set": set })
    }

    pub fn apply(&self, profile: &mut Profile) {
        match self {
            SubRecords::Experience(entries) => profile.experience.clone_from(entries),
            SubRecords::Education(entries) => profile.education.clone_from(entries),
        }
    }
}

/// The `users` document fields a profile is populated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

/// A profile document. `U` is the shape of the `user` field: the raw
/// reference as stored, or the joined [`UserSummary`] after population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile<U = ObjectId> {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: U,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: DateTime,
}

/// A profile whose `user` reference has been joined with the `users`
/// collection. `None` when the referenced user no longer exists.
pub type PopulatedProfile = Profile<Option<UserSummary>>;

impl Profile {
    pub fn populate(self, user: Option<UserSummary>) -> PopulatedProfile {
        Profile {
            id: self.id,
            user,
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            status: self.status,
            githubusername: self.githubusername,
            skills: self.skills,
            social: self.social,
            experience: self.experience,
            education: self.education,
            date: self.date,
        }
    }
}

/// Partial profile update built from an upsert request. Every `None` field is
/// left untouched when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

impl ProfileUpdate {
    fn scalars(&self) -> [(&'static str, &Option<String>); 6] {
        [
            ("company", &self.company),
            ("website", &self.website),
            ("location", &self.location),
            ("bio", &self.bio),
            ("status", &self.status),
            ("githubusername", &self.githubusername),
        ]
    }

    /// The body of a `$set` operator. Social links use dotted paths so unset
    /// links keep their stored value.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();

        for (key, value) in self.scalars() {
            if let Some(value) = value {
                set.insert(key, value.clone());
            }
        }

        if let Some(skills) = &self.skills {
            set.insert("skills", skills.clone());
        }

        for (key, value) in self.social.entries() {
            if let Some(value) = value {
                set.insert(format!("social.{key}"), value.clone());
            }
        }

        set
    }

    pub fn to_update_document(&self) -> Document {
        doc! { "$set": self.to_set_document() }
    }

    pub fn is_empty(&self) -> bool {
        self == &ProfileUpdate::default()
    }

    pub fn apply(&self, profile: &mut Profile) {
        let targets = [
            (&mut profile.company, &self.company),
            (&mut profile.website, &self.website),
            (&mut profile.location, &self.location),
            (&mut profile.bio, &self.bio),
            (&mut profile.status, &self.status),
            (&mut profile.githubusername, &self.githubusername),
        ];

        for (slot, value) in targets {
            if value.is_some() {
                slot.clone_from(value);
            }
        }

        if let Some(skills) = &self.skills {
            profile.skills.clone_from(skills);
        }

        profile.social.merge(&self.social);
    }

    /// A brand new profile for `user` holding exactly the fields of this update.
    pub fn into_profile(self, user: ObjectId) -> Profile {
        Profile {
            id: ObjectId::new(),
            user,
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            status: self.status,
            githubusername: self.githubusername,
            skills: self.skills.unwrap_or_default(),
            social: self.social,
            experience: Vec::new(),
            education: Vec::new(),
            date: DateTime::now(),
        }
    }
}
