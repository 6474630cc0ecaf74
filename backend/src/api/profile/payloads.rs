//! Request bodies for the profile endpoints and their validation.
//!
//! Every body is checked in full before anything touches the store, and all
//! failing fields are reported together in field declaration order.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize};
use validator::{Validate, ValidationErrors};

use crate::{
    database::models::{Education, Experience, ProfileUpdate, Social},
    errors::{AppError, FieldError},
    utils::{non_empty, parse_date, split_skills},
};

const INVALID_DATE: &str = "Invalid date";

/// `Json<T>` whose rejection is reported like any other validation failure.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(vec![FieldError::new(
                "body",
                rejection.body_text(),
            )])),
        }
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            let field = field.to_string();
            failures
                .iter()
                .map(|failure| {
                    let msg = failure
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| failure.code.to_string());
                    let mut error = FieldError::new(&field, msg);
                    error.value = failure.params.get("value").cloned();
                    error
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn check<T: Validate>(body: &T) -> Vec<FieldError> {
    body.validate()
        .err()
        .map(|errors| field_errors(&errors))
        .unwrap_or_default()
}

/// Parses an optional date, recording a field error when it is unreadable.
fn check_date(param: &str, raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<DateTime<Utc>> {
    let raw = raw.filter(|raw| !raw.is_empty())?;

    let parsed = parse_date(raw);
    if parsed.is_none() {
        errors.push(FieldError::new(param, INVALID_DATE).with_value(raw));
    }

    parsed
}

/// Like [`check_date`] for a field validation already requires. The epoch
/// stands in only while `errors` is non-empty.
fn check_required_date(param: &str, raw: Option<&str>, errors: &mut Vec<FieldError>) -> DateTime<Utc> {
    check_date(param, raw, errors).unwrap_or_default()
}

fn into_result(mut errors: Vec<FieldError>, order: &[&str]) -> Result<(), AppError> {
    if errors.is_empty() {
        return Ok(());
    }

    errors.sort_by_key(|error| {
        order
            .iter()
            .position(|name| *name == error.param)
            .unwrap_or(order.len())
    });

    Err(AppError::Validation(errors))
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(
        required(message = "Status is required"),
        length(min = 1, message = "Status is required")
    )]
    pub status: Option<String>,
    #[validate(
        required(message = "Skills is required"),
        length(min = 1, message = "Skills is required")
    )]
    pub skills: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

impl UpsertProfileRequest {
    const FIELDS: &'static [&'static str] = &["status", "skills"];

    /// Validates the body and keeps only the non-empty fields.
    pub fn into_update(self) -> Result<ProfileUpdate, AppError> {
        into_result(check(&self), Self::FIELDS)?;

        Ok(ProfileUpdate {
            company: non_empty(self.company),
            website: non_empty(self.website),
            location: non_empty(self.location),
            bio: non_empty(self.bio),
            status: non_empty(self.status),
            githubusername: non_empty(self.githubusername),
            skills: non_empty(self.skills).map(|skills| split_skills(&skills)),
            social: Social {
                youtube: non_empty(self.youtube),
                twitter: non_empty(self.twitter),
                facebook: non_empty(self.facebook),
                linkedin: non_empty(self.linkedin),
                instagram: non_empty(self.instagram),
            },
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExperienceRequest {
    #[validate(
        required(message = "Title is Required"),
        length(min = 1, message = "Title is Required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Company is Required"),
        length(min = 1, message = "Company is Required")
    )]
    pub company: Option<String>,
    #[validate(
        required(message = "From date is Required"),
        length(min = 1, message = "From date is Required")
    )]
    pub from: Option<String>,
    pub location: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl ExperienceRequest {
    const FIELDS: &'static [&'static str] = &["title", "company", "from", "to"];

    /// Validates the body and builds a new entry with a fresh id.
    pub fn into_experience(self) -> Result<Experience, AppError> {
        let mut errors = check(&self);
        let from = check_required_date("from", self.from.as_deref(), &mut errors);
        let to = check_date("to", self.to.as_deref(), &mut errors);
        into_result(errors, Self::FIELDS)?;

        Ok(Experience {
            id: ObjectId::new(),
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            location: non_empty(self.location),
            from: from.into(),
            to: to.map(Into::into),
            current: self.current.unwrap_or_default(),
            description: non_empty(self.description),
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct EducationRequest {
    #[validate(
        required(message = "school is Required"),
        length(min = 1, message = "school is Required")
    )]
    pub school: Option<String>,
    #[validate(
        required(message = "degree is Required"),
        length(min = 1, message = "degree is Required")
    )]
    pub degree: Option<String>,
    #[validate(
        required(message = "Field of study is required"),
        length(min = 1, message = "Field of study is required")
    )]
    pub fieldofstudy: Option<String>,
    #[validate(
        required(message = "From date is Required"),
        length(min = 1, message = "From date is Required")
    )]
    pub from: Option<String>,
    pub location: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl EducationRequest {
    const FIELDS: &'static [&'static str] = &["school", "degree", "fieldofstudy", "from", "to"];

    pub fn into_education(self) -> Result<Education, AppError> {
        let mut errors = check(&self);
        let from = check_required_date("from", self.from.as_deref(), &mut errors);
        let to = check_date("to", self.to.as_deref(), &mut errors);
        into_result(errors, Self::FIELDS)?;

        Ok(Education {
            id: ObjectId::new(),
            school: self.school.unwrap_or_default(),
            degree: self.degree.unwrap_or_default(),
            fieldofstudy: self.fieldofstudy.unwrap_or_default(),
            location: non_empty(self.location),
            from: from.into(),
            to: to.map(Into::into),
            current: self.current.unwrap_or_default(),
            description: non_empty(self.description),
        })
    }
}
