//! HTTP server.
//!
//! Serves search queries over the in-memory [`ReferenceStore`]. The store
//! is loaded before the listener is bound and shared read-only between
//! handlers through an `Arc`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/search` | Popularity-ranked products, optionally filtered by location and tags |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Malformed query options never produce an error; see [`crate::search`].
//! The only error response is an internal data-integrity failure:
//!
//! ```json
//! { "error": { "code": "internal", "message": "product 'p1' references unknown shop 's9'" } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser clients can
//! query the API directly.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use shop_search_core::ReferenceStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{Config, SearchConfig};
use crate::search::{run_query, SearchParams, SearchResponse};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Reference data, immutable after startup.
    pub store: Arc<ReferenceStore>,
    /// Defaults and limits applied while coercing query options.
    pub search: Arc<SearchConfig>,
}

impl AppState {
    pub fn new(store: ReferenceStore, search: SearchConfig) -> Self {
        Self {
            store: Arc::new(store),
            search: Arc::new(search),
        }
    }
}

/// Builds the application router with CORS applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(handle_search))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server on `[server].bind`.
///
/// The store must already be loaded; the server runs until the process
/// receives Ctrl-C.
pub async fn run_server(config: &Config, store: ReferenceStore) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(AppState::new(store, config.search.clone()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code.
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 500 error for data-integrity failures.
fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /search ============

/// Handler for `GET /search`.
///
/// Query pairs are taken as a list so that repeated or unknown keys never
/// fail extraction; [`SearchParams::from_pairs`] picks what it recognises.
async fn handle_search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, AppError> {
    let filters = SearchParams::from_pairs(pairs).into_filters(&state.search);

    let response = run_query(&state.store, &filters).map_err(|e| {
        tracing::error!(error = %e, "search failed");
        internal(e.to_string())
    })?;

    tracing::debug!(?filters, results = response.products.len(), "search");
    Ok(Json(response))
}
