//! # College API
//!
//! The API crate provides the web server for the college records service:
//! groups, subjects, students, teachers, weekly schedules, dated lessons,
//! time slots and lesson statistics.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Parse requests, call into `college-db`, shape responses
//! - **Middleware**: Error to HTTP status mapping
//! - **Config**: Handle environment and application configuration
//!
//! Handlers only see the [`DocumentStore`] trait, so the same router runs on
//! Postgres in production and on the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Body extractors with JSON error responses
pub mod extract;
/// Request handlers, one module per resource
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use college_db::DocumentStore;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Shared application state that is accessible to all request handlers
///
/// The store handle is built once in `main` and injected here.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use college_api::ApiState;
/// use college_db::MemoryStore;
///
/// let state = Arc::new(ApiState::new(Arc::new(MemoryStore::new())));
/// ```
pub struct ApiState {
    pub store: Arc<dyn DocumentStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        Some(origins) => AllowOrigin::list(origins.iter().filter_map(|origin| {
            match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(%origin, "ignoring invalid CORS origin: {e}");
                    None
                }
            }
        })),
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(allow_origin)
}

/// Builds the application router: resource routes under `/api/v1`, health
/// and version at the root, then CORS, request tracing and the per-request
/// deadline.
pub fn build_router(state: Arc<ApiState>, config: &config::ApiConfig) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Versioned resource endpoints
        .nest("/api/v1", routes::api_routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(cors_layer(config.cors_origins.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
}

/// Installs the global tracing subscriber, using `filter` as an
/// `EnvFilter` directive such as "info" or "college_db=debug,info".
pub fn init_tracing(filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).wrap_err_with(|| format!("Invalid LOG_LEVEL filter: {filter}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to install tracing subscriber: {e}"))
}

/// Starts the API server with the provided configuration and store
///
/// Expects [`init_tracing`] to have run already. Serves until the listener
/// fails.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use college_api::{config::ApiConfig, init_tracing, start_server};
/// use college_db::{create_pool, PgDocumentStore};
///
/// let config = ApiConfig::from_env()?;
/// init_tracing(&config.log_level)?;
/// let pool = create_pool(
///     &config.database_url,
///     config.database_max_connections,
///     config.database_connect_timeout,
/// )
/// .await?;
/// start_server(config, Arc::new(PgDocumentStore::new(pool))).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn DocumentStore>) -> Result<()> {
    // Create shared state with dependencies
    let state = Arc::new(ApiState::new(store));
    let app = build_router(state, &config);

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
