//! Relays a user's recent repositories from the configured repository host.

use std::sync::Arc;

use adapters::{AdapterError, RepositoryHost};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Repository host unreachable: {0}")]
    Unreachable(#[from] AdapterError),

    #[error("No Github Profile Found")]
    NotFound,

    #[error("Repository host sent an unreadable body: {0}")]
    Unparseable(#[from] serde_json::Error),
}

pub struct RepoLookup {
    host: Arc<dyn RepositoryHost>,
}

impl RepoLookup {
    pub fn new(host: Arc<dyn RepositoryHost>) -> Self {
        Self { host }
    }

    /// Fetches and parses the host's reply.
    ///
    /// A non-200 reply selects the not-found outcome, yet the body is still
    /// parsed afterwards; whatever it yields is discarded because the
    /// not-found outcome has already been chosen.
    pub async fn recent_repositories(&self, username: &str) -> Result<Value, LookupError> {
        let response = self.host.recent_repositories(username).await.map_err(|err| {
            error!(%username, %err, "github request failed");
            err
        })?;

        let outcome = if response.is_ok() {
            None
        } else {
            Some(LookupError::NotFound)
        };

        let parsed = serde_json::from_str::<Value>(&response.body);

        match (outcome, parsed) {
            (None, Ok(repositories)) => Ok(repositories),
            (None, Err(err)) => {
                error!(%username, %err, "github body is not JSON");
                Err(err.into())
            }
            (Some(not_found), parsed) => {
                warn!(
                    %username,
                    status = response.status,
                    parsed = parsed.is_ok(),
                    "github lookup missed, discarding body after not-found reply"
                );
                Err(not_found)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters::HostResponse;
    use async_trait::async_trait;
    use serde_json::json;

    struct Scripted(Option<HostResponse>);

    #[async_trait]
    impl RepositoryHost for Scripted {
        async fn recent_repositories(&self, _username: &str) -> Result<HostResponse, AdapterError> {
            self.0
                .clone()
                .ok_or_else(|| AdapterError::InvalidUrl("offline".into()))
        }
    }

    fn lookup(reply: Option<HostResponse>) -> RepoLookup {
        RepoLookup::new(Arc::new(Scripted(reply)))
    }

    #[tokio::test]
    async fn relays_parsed_body_on_200() {
        let repos = lookup(Some(HostResponse::new(200, r#"[{"name":"hello"}]"#)))
            .recent_repositories("octocat")
            .await
            .unwrap();

        assert_eq!(repos, json!([{ "name": "hello" }]));
    }

    #[tokio::test]
    async fn non_200_is_not_found_even_with_json_body() {
        let err = lookup(Some(HostResponse::new(404, r#"{"message":"Not Found"}"#)))
            .recent_repositories("ghost")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::NotFound));
    }

    #[tokio::test]
    async fn non_200_with_garbage_body_is_still_not_found() {
        let err = lookup(Some(HostResponse::new(502, "<html>")))
            .recent_repositories("ghost")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::NotFound));
    }

    #[tokio::test]
    async fn unparseable_200_body_is_an_error() {
        let err = lookup(Some(HostResponse::new(200, "not json")))
            .recent_repositories("octocat")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Unparseable(_)));
    }

    #[tokio::test]
    async fn transport_failure_falls_through() {
        let err = lookup(None).recent_repositories("octocat").await.unwrap_err();

        assert!(matches!(err, LookupError::Unreachable(_)));
    }
}
