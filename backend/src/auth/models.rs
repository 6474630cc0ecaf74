//! Data structures for authentication-related entities.
//!
//! This module defines the JWT claims shared with the account subsystem and
//! the resolved identity handed to protected handlers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsUser {
    pub id: String,
}

/// `{"user": {"id": "<hex>"}, "exp": <unix seconds>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: ClaimsUser,
    pub exp: u64,
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}
