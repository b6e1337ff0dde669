//! Request and response types for all mv-daemon HTTP endpoints.
//!
//! The quote body itself is `mv_md::Quote`. No business logic lives here.

use mv_md::MetalTable;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// /health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`; upstream state is not consulted.
    pub status: String,
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// /api/current-price
// ---------------------------------------------------------------------------

/// Query string for `GET /api/current-price`. Both fields are optional.
///
/// Built from raw pairs so a repeated key keeps its first value instead of
/// failing extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceQuery {
    pub symbol: Option<String>,
    pub currency: Option<String>,
}

impl PriceQuery {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut q = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "symbol" => &mut q.symbol,
                "currency" => &mut q.currency,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        q
    }
}

/// 400 body for an unrecognised `symbol`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidSymbolResponse {
    pub error: String,
    pub valid_symbols: Vec<String>,
}

// ---------------------------------------------------------------------------
// /api/metals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MetalsResponse {
    pub metals: MetalTable,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Error envelope (404 / 500)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
