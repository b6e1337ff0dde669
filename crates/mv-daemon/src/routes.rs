//! Axum router and all HTTP handlers for mv-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. Handlers are `pub(crate)` so the scenario tests in
//! `tests/` go through the router rather than calling them directly.

use std::{any::Any, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use mv_md::{normalizer::iso8601, Metal, MetalTable};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::{
    api_types::{ErrorResponse, HealthResponse, InvalidSymbolResponse, MetalsResponse, PriceQuery},
    state::AppState,
};

pub const DEFAULT_SYMBOL: &str = "XAU";
pub const DEFAULT_CURRENCY: &str = "USD";

const INDEX_HTML: &str = include_str!("../static/index.html");

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing, panic guard) are **not** applied here;
/// `main.rs` attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/current-price", get(current_price))
        .route("/api/metals", get(metals))
        .fallback(not_found)
        .with_state(state)
}

/// Convert handler panics into the JSON 500 envelope.
pub fn with_panic_guard(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(panic_response))
}

fn error_body(status: StatusCode, msg: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(detail, "handler panicked");
    error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

pub(crate) async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: iso8601(Utc::now()),
        }),
    )
}

// ---------------------------------------------------------------------------
// GET /api/current-price
// ---------------------------------------------------------------------------

/// Current quote for one metal.
///
/// `symbol` and `currency` default to XAU / USD when absent and are
/// uppercased. A repeated key uses its first value. Only `symbol` is
/// validated; any currency is forwarded.
/// Upstream failures never change the status code: the fetcher answers with
/// mock data instead.
pub(crate) async fn current_price(
    State(st): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let q = PriceQuery::from_pairs(pairs);
    let symbol = q
        .symbol
        .as_deref()
        .unwrap_or(DEFAULT_SYMBOL)
        .to_uppercase();
    let currency = q
        .currency
        .as_deref()
        .unwrap_or(DEFAULT_CURRENCY)
        .to_uppercase();

    if Metal::from_code(&symbol).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(InvalidSymbolResponse {
                error: format!("Invalid symbol: {symbol}"),
                valid_symbols: Metal::codes().into_iter().map(str::to_string).collect(),
            }),
        )
            .into_response();
    }

    let quote = st.fetcher.fetch(&symbol, &currency).await;
    (StatusCode::OK, Json(quote)).into_response()
}

// ---------------------------------------------------------------------------
// GET /api/metals
// ---------------------------------------------------------------------------

pub(crate) async fn metals() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(MetalsResponse {
            metals: MetalTable,
            count: MetalTable.len(),
        }),
    )
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

pub(crate) async fn not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "Endpoint not found")
}
