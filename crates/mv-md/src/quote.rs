//! The normalized quote returned by every price path.

use serde::{Deserialize, Serialize};

/// Where a [`Quote`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    LiveData,
    MockData,
}

/// A spot price snapshot for one metal in one currency.
///
/// Field names match the JSON served by `GET /api/current-price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    /// Display name; the raw symbol when the metal is unknown.
    pub name: String,
    pub price: f64,
    pub prev_close_price: f64,
    /// Absolute change against the previous close.
    pub ch: f64,
    /// Percent change against the previous close.
    pub change_pct: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub currency: String,
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub status: QuoteStatus,
    pub data_source: String,
    /// Fallback reason, set only on mock quotes produced after a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
