//! Profile service backend.
//!
//! This crate initializes the Axum web server, connects the profile store,
//! and registers the profile API under `/api/profile`. Developers keep one
//! profile each (bio, skills, social links, experience and education), and
//! the service can list a profile owner's recent GitHub repositories.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod utils;

use std::sync::Arc;

use adapters::{GithubClient, GithubCredentials, RepositoryHost};
use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use auth::TokenService;
use config::Config;
use database::{MemoryStore, MongoStore, ProfileStore};
use errors::StartupError;
use services::{ProfileManager, RepoLookup};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<ProfileManager>,
    pub repos: Arc<RepoLookup>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        host: Arc<dyn RepositoryHost>,
        tokens: TokenService,
    ) -> Self {
        Self {
            profiles: Arc::new(ProfileManager::new(store)),
            repos: Arc::new(RepoLookup::new(host)),
            tokens: Arc::new(tokens),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api/profile", api::profile::profile_router())
        .layer(middleware::http_trace())
        .with_state(state)
}

const DEFAULT_LOG_FILTER: &str = "info";

pub fn init_tracing() {
    fmt().with_env_filter(log_filter(EnvFilter::DEFAULT_ENV)).init();
}

/// Directives from `var`, or `info` when it is unset or unparseable.
fn log_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

pub async fn start_server() -> Result<(), StartupError> {
    let config = Config::load()?;

    info!("Initializing state...");
    let store: Arc<dyn ProfileStore> = match &config.mongo_uri {
        Some(uri) => Arc::new(MongoStore::connect(uri, &config.mongo_database).await?),
        None => {
            warn!("MONGO_URI not set, profiles will only be kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let host = GithubClient::new(
        &config.github.api_url,
        GithubCredentials {
            client_id: config.github.client_id.clone(),
            client_secret: config.github.client_secret.clone(),
        },
    )?;

    let state = AppState::new(store, Arc::new(host), TokenService::new(&config.jwt_secret));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn root_handler() -> &'static str {
    "API Running"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                error!(%err, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!(%err, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
