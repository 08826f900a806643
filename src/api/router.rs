//! HTTP router for the diagnosis service.
//!
//! Layer stack (outermost → innermost):
//! 1. CORS → 2. request tracing → 3. `Cache-Control: no-store`

use std::sync::Arc;

use axum::http::{header, HeaderValue, Uri};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the service router over shared state.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // The web client is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(endpoints::root::index))
        .route("/health", get(endpoints::health::check))
        .route("/models/status", get(endpoints::status::models))
        .route("/analyze", post(endpoints::analyze::analyze))
        .fallback(not_found)
        .with_state(ctx)
        // Responses carry patient data.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
