//! Route definitions and router construction.

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// API routes without the `/api` prefix (nested by [`create_router`]).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::status::stats))
        .route("/security", get(handlers::status::security))
        .route("/initialize", post(handlers::inference::initialize))
        .route("/generate", post(handlers::inference::generate))
        .route("/analyze", post(handlers::inference::analyze))
        .route("/endpoints/validate", post(handlers::endpoints::validate))
}

/// Create the main Axum router.
///
/// `/health` sits at the root for probes; everything else lives under `/api`.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(handlers::status::health))
        .nest("/api", api_routes().layer(cors))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
