//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the listen port, the MongoDB connection string, the token secret and the
//! GitHub API credentials.

use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::info;

pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_DATABASE: &str = "devconnector";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} is required")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct GithubSettings {
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongo_uri: Option<String>,
    pub mongo_database: String,
    pub jwt_secret: String,
    pub github: GithubSettings,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, normally the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            mongo_uri: lookup("MONGO_URI"),
            mongo_database: try_load(&lookup, "MONGO_DATABASE", DEFAULT_DATABASE)?,
            jwt_secret: lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            github: GithubSettings {
                api_url: try_load(&lookup, "GITHUB_API_URL", adapters::github::DEFAULT_API_URL)?,
                client_id: lookup("GITHUB_CLIENT_ID").unwrap_or_default(),
                client_secret: lookup("GITHUB_SECRET").unwrap_or_default(),
            },
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}
