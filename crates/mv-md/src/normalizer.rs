//! GoldAPI payload normalization.
//!
//! Converts a decoded [`UpstreamPayload`] into a live [`Quote`]. Every numeric
//! field is optional upstream; absent (or `null`) fields become `0.0`.
//!
//! It does **not**:
//! - perform HTTP (that is `goldapi.rs`)
//! - decide on fallback (that is `fetcher.rs`)

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::metal::display_name;
use crate::provider::PriceError;
use crate::quote::{Quote, QuoteStatus};

/// Epoch values above this are treated as milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A numeric field as GoldAPI may send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn to_f64(&self, field: &'static str) -> Result<f64, PriceError> {
        match self {
            Numeric::Number(n) => Ok(*n),
            Numeric::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    PriceError::Decode(format!("could not convert {field} to float: '{s}'"))
                }),
        }
    }
}

/// `timestamp` is epoch seconds from GoldAPI, but fractional epochs and
/// strings are tolerated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UpstreamTimestamp {
    Epoch(i64),
    EpochFloat(f64),
    Text(String),
}

/// The GoldAPI `/api/{symbol}/{currency}` response body.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpstreamPayload {
    #[serde(default)]
    pub price: Option<Numeric>,
    #[serde(default)]
    pub prev_close_price: Option<Numeric>,
    #[serde(default)]
    pub ch: Option<Numeric>,
    #[serde(default)]
    pub chp: Option<Numeric>,
    #[serde(default)]
    pub high_price: Option<Numeric>,
    #[serde(default)]
    pub low_price: Option<Numeric>,
    #[serde(default)]
    pub open_price: Option<Numeric>,
    #[serde(default)]
    pub timestamp: Option<UpstreamTimestamp>,
    #[serde(default)]
    pub error: Option<Value>,
}

fn field_or_zero(v: &Option<Numeric>, field: &'static str) -> Result<f64, PriceError> {
    match v {
        Some(n) => n.to_f64(field),
        None => Ok(0.0),
    }
}

impl UpstreamPayload {
    /// Decode a raw response body.
    pub fn from_body(body: &str) -> Result<Self, PriceError> {
        serde_json::from_str(body).map_err(|e| PriceError::Decode(e.to_string()))
    }

    /// The upstream-reported error text, if the payload carries one.
    ///
    /// An explicit `"error": null` is not an error here, so that payload
    /// still yields a live quote.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn price(&self) -> Result<f64, PriceError> {
        field_or_zero(&self.price, "price")
    }

    pub fn prev_close_price(&self) -> Result<f64, PriceError> {
        field_or_zero(&self.prev_close_price, "prev_close_price")
    }

    pub fn change(&self) -> Result<f64, PriceError> {
        field_or_zero(&self.ch, "ch")
    }

    pub fn change_pct(&self) -> Result<f64, PriceError> {
        field_or_zero(&self.chp, "chp")
    }

    pub fn high(&self) -> Result<f64, PriceError> {
        field_or_zero(&self.high_price, "high_price")
    }

    pub fn low(&self) -> Result<f64, PriceError> {
        field_or_zero(&self.low_price, "low_price")
    }

    pub fn open(&self) -> Result<f64, PriceError> {
        field_or_zero(&self.open_price, "open_price")
    }

    /// ISO-8601 rendering of the upstream timestamp, or `now` when absent.
    pub fn timestamp_iso(&self, now: DateTime<Utc>) -> Result<String, PriceError> {
        match &self.timestamp {
            None => Ok(iso8601(now)),
            Some(UpstreamTimestamp::Text(s)) => Ok(s.clone()),
            Some(UpstreamTimestamp::Epoch(n)) => {
                let dt = if n.abs() >= EPOCH_MILLIS_THRESHOLD {
                    DateTime::from_timestamp_millis(*n)
                } else {
                    DateTime::from_timestamp(*n, 0)
                };
                dt.map(iso8601)
                    .ok_or_else(|| PriceError::Decode(format!("timestamp out of range: {n}")))
            }
            Some(UpstreamTimestamp::EpochFloat(x)) => {
                let millis = if x.abs() >= EPOCH_MILLIS_THRESHOLD as f64 {
                    x.round()
                } else {
                    (x * 1000.0).round()
                };
                // `as` saturates, and saturated values fall outside chrono's range.
                DateTime::from_timestamp_millis(millis as i64)
                    .map(iso8601)
                    .ok_or_else(|| PriceError::Decode(format!("timestamp out of range: {x}")))
            }
        }
    }
}

/// Render `dt` the way every timestamp in the service is rendered.
pub fn iso8601(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Build a live quote from a successful payload.
///
/// Callers must check [`UpstreamPayload::error_message`] first; this function
/// does not look at the `error` field.
pub fn normalize(
    payload: &UpstreamPayload,
    symbol: &str,
    currency: &str,
    source: &str,
    now: DateTime<Utc>,
) -> Result<Quote, PriceError> {
    Ok(Quote {
        symbol: symbol.to_string(),
        name: display_name(symbol),
        price: payload.price()?,
        prev_close_price: payload.prev_close_price()?,
        ch: payload.change()?,
        change_pct: payload.change_pct()?,
        high: payload.high()?,
        low: payload.low()?,
        open: payload.open()?,
        currency: currency.to_string(),
        timestamp: payload.timestamp_iso(now)?,
        status: QuoteStatus::LiveData,
        data_source: source.to_string(),
        error: None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
