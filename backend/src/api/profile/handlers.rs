//! Handler functions for the profile API endpoints.
//!
//! These functions extract the caller and the request body, delegate to
//! `services::profile_manager` or `services::repo_lookup`, and render the
//! outcome as JSON.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{
    models::{ProfileView, UserView},
    payloads::{EducationRequest, ExperienceRequest, JsonBody, UpsertProfileRequest},
};
use crate::{
    auth::AuthUser,
    database::StoreError,
    errors::AppError,
    services::{LookupError, ProfileError},
    AppState,
};

const NO_PROFILE_FOR_USER: &str = "There is no profile for this user";
const PROFILE_NOT_FOUND: &str = "Profile not found";

type PopulatedView = ProfileView<Option<UserView>>;

/// GET /me
pub async fn own_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<PopulatedView>, AppError> {
    let profile = state
        .profiles
        .own_profile(&user.id)
        .await?
        .ok_or(AppError::NotFound(NO_PROFILE_FOR_USER))?;

    Ok(Json(profile.into()))
}

/// POST /
pub async fn upsert_profile(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<UpsertProfileRequest>,
) -> Result<Json<ProfileView<String>>, AppError> {
    let update = payload.into_update()?;
    let profile = state.profiles.upsert(&user.id, update).await?;

    Ok(Json(profile.into()))
}

/// GET /
pub async fn all_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<PopulatedView>>, AppError> {
    let profiles = state.profiles.all_profiles().await?;

    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

/// GET /user/:user_id
///
/// A malformed id gets the same reply as an id without a profile.
pub async fn profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PopulatedView>, AppError> {
    match state.profiles.profile_by_user(&user_id).await {
        Ok(Some(profile)) => Ok(Json(profile.into())),
        Ok(None) | Err(ProfileError::Store(StoreError::MalformedId(_))) => {
            Err(AppError::NotFound(PROFILE_NOT_FOUND))
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    state.profiles.delete_account(&user.id).await?;

    Ok(Json(json!({ "msg": "User Removed!" })))
}

/// PUT /experience
pub async fn add_experience(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<ExperienceRequest>,
) -> Result<Json<ProfileView<String>>, AppError> {
    let experience = payload.into_experience()?;
    let profile = state.profiles.add_experience(&user.id, experience).await?;

    Ok(Json(profile.into()))
}

/// DELETE /experience/:exp_id
pub async fn remove_experience(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileView<String>>, AppError> {
    let profile = state.profiles.remove_experience(&user.id, &exp_id).await?;

    Ok(Json(profile.into()))
}

/// PUT /education
pub async fn add_education(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<EducationRequest>,
) -> Result<Json<ProfileView<String>>, AppError> {
    let education = payload.into_education()?;
    let profile = state.profiles.add_education(&user.id, education).await?;

    Ok(Json(profile.into()))
}

/// DELETE /education/:edu_id
pub async fn remove_education(
    State(state): State<AppState>,
    user: AuthUser,
    Path(edu_id): Path<String>,
) -> Result<Json<ProfileView<String>>, AppError> {
    let profile = state.profiles.remove_education(&user.id, &edu_id).await?;

    Ok(Json(profile.into()))
}

/// GET /github/:username
pub async fn github_repositories(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, AppError> {
    match state.repos.recent_repositories(&username).await {
        Ok(repositories) => Ok(Json(repositories)),
        Err(LookupError::NotFound) => Err(AppError::GithubNotFound),
        Err(err) => Err(AppError::Internal(err.to_string())),
    }
}
