//! JSON shapes returned by the profile endpoints.
//!
//! Identifiers are rendered as hex strings and dates as RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::{
    Education, Experience, PopulatedProfile, Profile, Social, UserSummary,
};

#[derive(Debug, Serialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl From<UserSummary> for UserView {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            avatar: user.avatar,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExperienceView {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Experience> for ExperienceView {
    fn from(entry: Experience) -> Self {
        Self {
            id: entry.id.to_hex(),
            title: entry.title,
            company: entry.company,
            location: entry.location,
            from: entry.from.to_chrono(),
            to: entry.to.map(|to| to.to_chrono()),
            current: entry.current,
            description: entry.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EducationView {
    #[serde(rename = "_id")]
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Education> for EducationView {
    fn from(entry: Education) -> Self {
        Self {
            id: entry.id.to_hex(),
            school: entry.school,
            degree: entry.degree,
            fieldofstudy: entry.fieldofstudy,
            location: entry.location,
            from: entry.from.to_chrono(),
            to: entry.to.map(|to| to.to_chrono()),
            current: entry.current,
            description: entry.description,
        }
    }
}

/// `U` is either the user's hex id or the populated [`UserView`].
#[derive(Debug, Serialize)]
pub struct ProfileView<U> {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: U,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub experience: Vec<ExperienceView>,
    pub education: Vec<EducationView>,
    pub date: DateTime<Utc>,
}

impl<U> ProfileView<U> {
    fn from_profile<T>(profile: Profile<T>, user: impl FnOnce(T) -> U) -> Self {
        Self {
            id: profile.id.to_hex(),
            user: user(profile.user),
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            status: profile.status,
            githubusername: profile.githubusername,
            skills: profile.skills,
            social: profile.social,
            experience: profile.experience.into_iter().map(Into::into).collect(),
            education: profile.education.into_iter().map(Into::into).collect(),
            date: profile.date.to_chrono(),
        }
    }
}

impl From<Profile> for ProfileView<String> {
    fn from(profile: Profile) -> Self {
        Self::from_profile(profile, |user| user.to_hex())
    }
}

impl From<PopulatedProfile> for ProfileView<Option<UserView>> {
    fn from(profile: PopulatedProfile) -> Self {
        Self::from_profile(profile, |user| user.map(UserView::from))
    }
}
