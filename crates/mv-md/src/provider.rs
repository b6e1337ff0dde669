//! Provider boundary for live spot quotes.
//!
//! This module defines **only** the error taxonomy and the source trait.
//! The concrete GoldAPI client lives in `goldapi.rs`; payload decoding in
//! `normalizer.rs`; the fallback policy in `fetcher.rs`.

use std::fmt;

use crate::quote::Quote;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Why a live quote could not be produced.
///
/// Every variant is absorbed by [`crate::PriceFetcher::fetch`] and turned
/// into a mock quote; the message is carried verbatim on that quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The upstream credential is missing or a placeholder.
    Config(String),
    /// Network or transport failure, including timeouts and non-2xx statuses.
    Transport(String),
    /// The upstream answered with an explicit `error` field.
    Upstream(String),
    /// A response payload could not be decoded.
    Decode(String),
}

impl PriceError {
    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PriceError::Config(_) => "config",
            PriceError::Transport(_) => "transport",
            PriceError::Upstream(_) => "upstream",
            PriceError::Decode(_) => "decode",
        }
    }

    /// The raw reason text, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            PriceError::Config(m)
            | PriceError::Transport(m)
            | PriceError::Upstream(m)
            | PriceError::Decode(m) => m,
        }
    }
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceError::Config(msg) => write!(f, "config error: {msg}"),
            PriceError::Transport(msg) => write!(f, "transport error: {msg}"),
            PriceError::Upstream(msg) => write!(f, "provider api error: {msg}"),
            PriceError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for PriceError {}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Upstream live-quote provider contract.
///
/// Implementations must be object-safe and `Send + Sync` so the fetcher can
/// hold an `Arc<dyn QuoteSource>` shared across request tasks.
#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    /// Label stamped into `Quote::data_source` (e.g. `"GoldAPI.io"`).
    fn source_name(&self) -> &'static str;

    /// Fetch one live quote. Must not retry.
    async fn fetch_quote(&self, symbol: &str, currency: &str) -> Result<Quote, PriceError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
