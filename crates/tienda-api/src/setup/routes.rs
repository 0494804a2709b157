//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api_doc;
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;

const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// How many files a single multipart upload request may carry.
const UPLOAD_BATCH_MAX_FILES: usize = 10;

/// Headroom for multipart boundaries and part headers.
const MULTIPART_FRAMING_OVERHEAD: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(state: &Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(&state.config.cors_origins)?;

    // The layer caps the whole request, so it must fit a full batch of
    // files. Per-file size is enforced in the upload handler, where one
    // oversized file fails alone without sinking the rest of the batch.
    let body_limit =
        state.assets.max_file_size_bytes * UPLOAD_BATCH_MAX_FILES + MULTIPART_FRAMING_OVERHEAD;

    let admin_routes = Router::new()
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        // One dynamic segment serves both verbs: GET treats it as a slug,
        // PUT as the product id.
        .route(
            "/products/{slug}",
            get(handlers::products::get_product_draft).put(handlers::products::update_product),
        )
        .route("/upload", post(handlers::upload::upload_images))
        .route("/orders", get(handlers::orders::list_orders));

    let app = Router::new()
        .nest(API_PREFIX, admin_routes)
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(api_doc::get_openapi_spec()) }),
        )
        .merge(Into::<Router<Arc<AppState>>>::into(
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"),
        ))
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(body_limit))
        // Axum's built-in 2 MB extractor cap would otherwise trump the
        // batch-sized limit above.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok(app)
}

fn setup_cors(origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let cors = if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    } else {
        let parsed: Result<Vec<HeaderValue>, _> =
            origins.iter().map(|o| o.parse::<HeaderValue>()).collect();
        CorsLayer::new()
            .allow_origin(parsed.map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };
    Ok(cors)
}
