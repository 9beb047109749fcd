//! # Benchdash HTTP API Module
//!
//! JSON API consumed by the dashboard front end, built on axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /systems` - Full catalog
//! - `POST /systems/filter` - Filtered catalog (`{criteria, query}` body)
//! - `GET /systems/{id}` - One system with its timeline and profile
//! - `POST /timeline` - Timeline views of the filtered systems
//! - `POST /profiles` - Performance profiles of the filtered systems
//! - `GET /suites/{suite}` - Ranking and averages of a benchmark suite
//! - `GET /summary` - Dashboard headline numbers
//! - `GET /filters` - Filter groups with available options
//!
//! ## Security Configuration
//!
//! - `cors_origins` / `BENCHDASH_CORS_ORIGINS`: allowed origins, or "*" for
//!   all (default: localhost only)
//! - `rate_limit` / `BENCHDASH_RATE_LIMIT`: requests per second (default:
//!   100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    FilterRequest, FiltersResponse, HealthResponse, ProfilesResponse, SuiteResponse,
    SystemDetailResponse, SystemsResponse, TimelineResponse,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use benchdash_core::{Catalog, Clock, DashError};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MiB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the catalog is read-only, so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            clock,
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from the configured origins.
///
/// - `["*"]`: allow every origin
/// - `None`: localhost only
/// - otherwise: the listed origins; invalid entries are skipped
fn build_cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some([only]) if only == "*" => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(hv) => {
                        tracing::info!("CORS: Allowing origin: {}", origin);
                        Some(hv)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                restricted_cors(allowed)
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// A restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    restricted_cors(origins)
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate limiting (if enabled)
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/systems", get(handlers::systems_handler))
        .route("/systems/filter", post(handlers::filter_handler))
        .route("/systems/{id}", get(handlers::system_handler))
        .route("/timeline", post(handlers::timeline_handler))
        .route("/profiles", post(handlers::profiles_handler))
        .route("/suites/{suite}", get(handlers::suite_handler))
        .route("/summary", get(handlers::summary_handler))
        .route("/filters", get(handlers::filters_handler));

    if config.rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", config.rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(config.rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(config.cors_origins.as_deref()))
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Bind and serve until Ctrl+C.
pub async fn run_server(state: AppState, config: &ServerConfig) -> Result<(), DashError> {
    let addr = config.bind_addr();
    let router = create_router(state, config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DashError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Benchdash HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DashError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
