//! # Campus API
//!
//! The HTTP surface of the campus administration backend: course catalog,
//! enrollment, attendance, grading, hostels and room allotment.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure, one router per area
//! - **Handlers**: request validation and workflow orchestration
//! - **Middleware**: error mapping, password hashing, the maintenance gate
//! - **Services**: feature flags and the external allotment policy client
//! - **Config**: environment configuration
//!
//! Handlers only talk to storage through [`campus_db::Database`], so the same
//! router runs over Postgres in production and over the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement the workflows
pub mod handlers;
/// Middleware for error handling, hashing and maintenance mode
pub mod middleware;
/// Success envelope shared by every handler
pub mod response;
/// Route definitions and API endpoint structure
pub mod routes;
/// Feature flags and the allotment policy client
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, error_handling::HandleErrorLayer, http::HeaderValue};
use campus_db::{Database, DbPool, PgStore};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use services::{
    feature_flags::{FeatureFlags, StoredFeatureFlags},
    policy::{AllotmentPolicy, HttpPolicyClient},
};

/// Shared application state that is accessible to all request handlers
///
/// Every dependency sits behind a trait object so tests can swap in the
/// in-memory store and a mocked policy service.
pub struct ApiState {
    /// Repositories for every aggregate
    pub db: Arc<dyn Database>,
    /// Settings document, read on every gated request
    pub flags: Arc<dyn FeatureFlags>,
    /// External allocator consulted by auto-allocation
    pub policy: Arc<dyn AllotmentPolicy>,
}

impl ApiState {
    /// Builds state whose feature flags are read from the same store.
    pub fn new(db: Arc<dyn Database>, policy: Arc<dyn AllotmentPolicy>) -> Self {
        let flags = Arc::new(StoredFeatureFlags::new(Arc::clone(&db)));
        Self { db, flags, policy }
    }
}

/// Assembles every route, the maintenance gate and request tracing.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::student::routes())
        .merge(routes::academic::routes())
        .merge(routes::calendar::routes())
        .merge(routes::enrollment::routes())
        .merge(routes::attendance::routes())
        .merge(routes::grade::routes())
        .merge(routes::hostel::routes())
        .merge(routes::complaint::routes())
        .merge(routes::willingness::routes())
        .merge(routes::allotment::routes())
        .merge(routes::admin::routes())
        .merge(routes::settings::routes())
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            middleware::maintenance::maintenance_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database pool
///
/// Installs the tracing subscriber, wires the Postgres store and the policy
/// client into [`ApiState`], applies CORS and the request timeout, and serves
/// until the process is stopped.
///
/// # Errors
///
/// Fails when a CORS origin is not a valid header value, when the policy
/// client cannot be built, or when the listener cannot bind.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let db: Arc<dyn Database> = Arc::new(PgStore::new(db_pool));
    let policy = Arc::new(HttpPolicyClient::new(
        config.allotment_policy_url.clone(),
        Duration::from_secs(config.allotment_policy_timeout),
    )?);
    if config.allotment_policy_url.is_none() {
        tracing::warn!("ALLOTMENT_POLICY_URL is not set; auto-allocation is disabled");
    }

    let state = Arc::new(ApiState::new(db, policy));
    let app = build_router(state);

    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(middleware::error_handling::handle_layer_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
