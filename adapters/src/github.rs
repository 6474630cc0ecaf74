//! GitHub adapter implementation for repository lookups.
//!
//! This file contains the concrete implementation of the `RepositoryHost`
//! trait for GitHub's REST API, including the client wrapper and the URL
//! construction for the repository listing query.

use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client, Url};
use tracing::debug;

use crate::{errors::AdapterError, models::HostResponse, RepositoryHost};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repositories returned per lookup.
const PAGE_SIZE: &str = "5";
const SORT_ORDER: &str = "created:asc";
const CLIENT_AGENT: &str = "devprofile";

#[derive(Debug, Clone, Default)]
pub struct GithubCredentials {
    pub client_id: String,
    pub client_secret: String,
}

pub struct GithubClient {
    http: Client,
    base_url: Url,
    credentials: GithubCredentials,
}

impl GithubClient {
    pub fn new(base_url: &str, credentials: GithubCredentials) -> Result<Self, AdapterError> {
        let base_url =
            Url::parse(base_url).map_err(|err| AdapterError::InvalidUrl(err.to_string()))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            credentials,
        })
    }

    /// Builds `{base}/users/{username}/repos?per_page=5&sort=created:asc&client_id=..&client_secret=..`.
    pub fn repos_url(&self, username: &str) -> Result<Url, AdapterError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| AdapterError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);

        url.query_pairs_mut()
            .append_pair("per_page", PAGE_SIZE)
            .append_pair("sort", SORT_ORDER)
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("client_secret", &self.credentials.client_secret);

        Ok(url)
    }
}

#[async_trait]
impl RepositoryHost for GithubClient {
    async fn recent_repositories(&self, username: &str) -> Result<HostResponse, AdapterError> {
        let url = self.repos_url(username)?;
        debug!(%username, "querying github repositories");

        let response = self
            .http
            .get(url)
            .header(USER_AGENT, CLIENT_AGENT)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HostResponse { status, body })
    }
}
