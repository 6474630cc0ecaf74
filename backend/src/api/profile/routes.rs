//! Defines the HTTP routes for the profile API.
//!
//! Protected handlers take an `AuthUser` argument, so authentication is
//! enforced per handler rather than per route group.

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::handlers::{
    add_education, add_experience, all_profiles, delete_account, github_repositories,
    own_profile, profile_by_user, remove_education, remove_experience, upsert_profile,
};
use crate::AppState;

pub fn profile_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(own_profile))
        .route(
            "/",
            get(all_profiles).post(upsert_profile).delete(delete_account),
        )
        .route("/user/:user_id", get(profile_by_user))
        .route("/experience", put(add_experience))
        .route("/experience/:exp_id", delete(remove_experience))
        .route("/education", put(add_education))
        .route("/education/:edu_id", delete(remove_education))
        .route("/github/:username", get(github_repositories))
}
