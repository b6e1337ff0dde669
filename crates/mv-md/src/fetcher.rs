//! Live-or-mock price fetching.
//!
//! [`PriceFetcher::fetch`] never fails: any [`PriceError`] from the live path
//! is logged and replaced by a mock quote carrying the error text.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::goldapi::{GoldApiSource, GOLDAPI_BASE_URL};
use crate::mock::MockGenerator;
use crate::provider::{PriceError, QuoteSource};
use crate::quote::Quote;

pub use mv_config::secrets::{usable_api_key, PLACEHOLDER_API_KEY};

/// Upstream request timeout. Exceeding it counts as a transport failure.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

pub const MISSING_KEY_MESSAGE: &str = "API key not configured.";

/// Settings needed to build a [`PriceFetcher`].
///
/// **`api_key` is redacted in `Debug` output.**
#[derive(Clone)]
pub struct FetcherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GOLDAPI_BASE_URL.to_string(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for FetcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<REDACTED>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone)]
pub struct PriceFetcher {
    /// `None` when no usable credential was configured: every fetch is mock.
    source: Option<Arc<dyn QuoteSource>>,
    mock: MockGenerator,
}

impl std::fmt::Debug for PriceFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceFetcher")
            .field("source", &self.source.as_ref().map(|s| s.source_name()))
            .field("mock", &self.mock)
            .finish()
    }
}

impl PriceFetcher {
    /// Build a GoldAPI-backed fetcher, or a mock-only one if the key is unusable.
    pub fn new(cfg: FetcherConfig, mock: MockGenerator) -> Self {
        let source = usable_api_key(cfg.api_key.as_deref()).map(|key| {
            Arc::new(GoldApiSource::new_with_base_url(key, cfg.base_url, cfg.timeout))
                as Arc<dyn QuoteSource>
        });
        Self { source, mock }
    }

    /// Build a fetcher around an arbitrary source.
    pub fn with_source(source: Arc<dyn QuoteSource>, mock: MockGenerator) -> Self {
        Self {
            source: Some(source),
            mock,
        }
    }

    pub fn mock_only(mock: MockGenerator) -> Self {
        Self { source: None, mock }
    }

    /// `true` when a live source is wired.
    pub fn has_live_source(&self) -> bool {
        self.source.is_some()
    }

    /// Attempt a live quote without falling back.
    pub async fn fetch_live(&self, symbol: &str, currency: &str) -> Result<Quote, PriceError> {
        match &self.source {
            Some(src) => src.fetch_quote(symbol, currency).await,
            None => Err(PriceError::Config(MISSING_KEY_MESSAGE.to_string())),
        }
    }

    /// Live quote when possible, otherwise a mock quote carrying the reason.
    pub async fn fetch(&self, symbol: &str, currency: &str) -> Quote {
        match self.fetch_live(symbol, currency).await {
            Ok(quote) => quote,
            Err(err) => {
                warn!(
                    symbol,
                    currency,
                    kind = err.kind(),
                    reason = err.message(),
                    "live quote unavailable; serving mock data"
                );
                self.mock.generate(symbol, currency, Some(err.message()))
            }
        }
    }
}
