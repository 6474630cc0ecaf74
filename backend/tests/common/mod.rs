#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use adapters::{AdapterError, HostResponse, RepositoryHost};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use bson::oid::ObjectId;
use devprofile::{app, auth::TokenService, database::MemoryStore, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

/// Replies with a fixed response, or fails at the transport layer when `None`.
pub struct ScriptedHost(pub Option<HostResponse>);

#[async_trait]
impl RepositoryHost for ScriptedHost {
    async fn recent_repositories(&self, _username: &str) -> Result<HostResponse, AdapterError> {
        self.0
            .clone()
            .ok_or_else(|| AdapterError::InvalidUrl("host unreachable".into()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    tokens: TokenService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_host(None)
    }

    pub fn with_host(reply: Option<HostResponse>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            store.clone(),
            Arc::new(ScriptedHost(reply)),
            TokenService::new(SECRET),
        );

        Self {
            router: app(state),
            store,
            tokens: TokenService::new(SECRET),
        }
    }

    /// Registers a user and returns its id with a valid token.
    pub async fn user(&self, name: &str) -> (ObjectId, String) {
        let id = self.store.add_user(name, &format!("//gravatar/{name}")).await;
        let token = self
            .tokens
            .issue(&id.to_hex(), Duration::from_secs(3600))
            .unwrap();
        (id, token)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header("x-auth-token", token);
        }

        let request = match body {
            Some(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.call(Method::GET, uri, token, None).await
    }
}
