//! # KickSFO HTTP Module
//!
//! This module implements the dashboard server using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Dashboard page (`?athlete=..&submitted=1` selects athletes)
//! - `POST /upload` - Replace the loaded data with a CSV upload (multipart)
//! - `POST /reset` - Return to the bundled sample data
//! - `GET /chart.svg` - Radar chart alone
//! - `GET /api/health` - Health check
//! - `GET /api/axes` - Taxonomy axes in chart order
//! - `GET /api/scores` - Score table of the loaded data
//! - `GET /api/profiles` - Athlete profile summary
//! - `GET /api/radar` - Radar traces for the selection
//! - `POST /api/score` - Score a CSV body without loading it
//!
//! ## Configuration (Environment Variables)
//!
//! - `KICKSFO_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: the dashboard's own origin)
//! - `KICKSFO_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
#[allow(unused_imports)]
pub use handlers::{
    axes_handler, chart_handler, dashboard_handler, health_handler, profiles_handler,
    radar_handler, reset_handler, score_csv_handler, scores_handler, upload_handler,
};
#[allow(unused_imports)]
pub use types::{
    AxesResponse, HealthResponse, ProfilesResponse, RadarResponse, ScoresResponse, Selection,
};

use crate::config::DashboardConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use kicksfo_core::{Analysis, KickError, Taxonomy, primitives::MAX_UPLOAD_BYTES};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and headers on top of the CSV itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the fixed configuration and the current analysis.
///
/// The analysis is replaced wholesale on upload or reset; nothing else
/// mutates it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub analysis: Arc<RwLock<Analysis>>,
}

impl AppState {
    /// Create state that starts on the sample data.
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let analysis = Analysis::sample(&config.taxonomy);
        Self::with_analysis(config, analysis)
    }

    /// Create state around an already loaded analysis.
    #[must_use]
    pub fn with_analysis(config: DashboardConfig, analysis: Analysis) -> Self {
        Self {
            config: Arc::new(config),
            analysis: Arc::new(RwLock::new(analysis)),
        }
    }

    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.config.taxonomy
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Address assumed by [`create_router`] when the bind address is not known.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";

/// Build CORS layer from environment configuration.
///
/// Reads `KICKSFO_CORS_ORIGINS`:
/// - If "*": allows all origins
/// - If not set: the dashboard's own origin (see [`local_origins`])
/// - Otherwise: comma-separated list of allowed origins
fn build_cors_layer(addr: &str) -> CorsLayer {
    let origins_env = std::env::var("KICKSFO_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (KICKSFO_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in KICKSFO_CORS_ORIGINS, defaulting to local origins"
                );
                build_local_cors(addr)
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::debug!("CORS: No KICKSFO_CORS_ORIGINS set, defaulting to local origins");
            build_local_cors(addr)
        }
    }
}

/// Origins under which the dashboard served at `addr` loads itself.
///
/// `http://{addr}` always; a loopback or wildcard host also admits
/// `localhost` and `127.0.0.1` on the same port.
pub fn local_origins(addr: &str) -> Vec<HeaderValue> {
    let mut origins = vec![format!("http://{addr}")];
    if let Some((host, port)) = addr.rsplit_once(':')
        && matches!(host, "127.0.0.1" | "localhost" | "0.0.0.0" | "[::]" | "[::1]")
    {
        for local in ["localhost", "127.0.0.1"] {
            let origin = format!("http://{local}:{port}");
            if !origins.contains(&origin) {
                origins.push(origin);
            }
        }
    }
    origins
        .into_iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect()
}

/// Build a restrictive CORS layer that only allows the dashboard's origin.
fn build_local_cors(addr: &str) -> CorsLayer {
    let origins = local_origins(addr);
    tracing::debug!("CORS: Allowing local origins for {}", addr);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router for a server bound to [`DEFAULT_ADDR`].
pub fn create_router(state: AppState) -> Router {
    create_router_for(state, DEFAULT_ADDR)
}

/// Create the axum router with all endpoints and middleware for a server
/// bound to `addr`.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit - caps uploads
/// 4. Rate Limiting - if enabled
pub fn create_router_for(state: AppState, addr: &str) -> Router {
    let cors = build_cors_layer(addr);

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let mut router = Router::new()
        .route("/", get(handlers::dashboard_handler))
        .route("/upload", post(handlers::upload_handler))
        .route("/reset", post(handlers::reset_handler))
        .route("/chart.svg", get(handlers::chart_handler))
        .route("/api/health", get(handlers::health_handler))
        .route("/api/axes", get(handlers::axes_handler))
        .route("/api/scores", get(handlers::scores_handler))
        .route("/api/profiles", get(handlers::profiles_handler))
        .route("/api/radar", get(handlers::radar_handler))
        .route("/api/score", post(handlers::score_csv_handler));

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), KickError> {
    let router = create_router_for(state, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| KickError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("KickSFO dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| KickError::IoError(format!("Server error: {}", e)))
}
