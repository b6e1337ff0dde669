//! GoldAPI.io-backed live quote source.
//!
//! API key is resolved by the caller (daemon startup) and passed in; do not log it.

use std::time::Duration;

use chrono::Utc;

use crate::normalizer::{normalize, UpstreamPayload};
use crate::provider::{PriceError, QuoteSource};
use crate::quote::Quote;

pub const GOLDAPI_BASE_URL: &str = "https://www.goldapi.io";
pub const GOLDAPI_SOURCE_NAME: &str = "GoldAPI.io";

#[derive(Clone)]
pub struct GoldApiSource {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for GoldApiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoldApiSource")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GoldApiSource {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::new_with_base_url(api_key, GOLDAPI_BASE_URL.to_string(), timeout)
    }

    pub fn new_with_base_url(api_key: String, base_url: String, timeout: Duration) -> Self {
        Self {
            api_key,
            http: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    fn build_quote_url(&self, symbol: &str, currency: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url.trim_end_matches('/'),
            symbol,
            currency
        )
    }
}

#[async_trait::async_trait]
impl QuoteSource for GoldApiSource {
    fn source_name(&self) -> &'static str {
        GOLDAPI_SOURCE_NAME
    }

    async fn fetch_quote(&self, symbol: &str, currency: &str) -> Result<Quote, PriceError> {
        let url = self.build_quote_url(symbol, currency);

        let resp = self
            .http
            .get(url)
            .header("x-access-token", self.api_key.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PriceError::Transport(e.to_string()))?;

        // Non-2xx is classified with the network failures, not as an upstream error.
        let resp = resp
            .error_for_status()
            .map_err(|e| PriceError::Transport(e.to_string()))?;

        let body = resp
            .text()
            .await
            .map_err(|e| PriceError::Transport(e.to_string()))?;

        let payload = UpstreamPayload::from_body(&body)?;
        if let Some(err) = payload.error_message() {
            return Err(PriceError::Upstream(err));
        }

        normalize(&payload, symbol, currency, self.source_name(), Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_url_joins_without_double_slash() {
        let src = GoldApiSource::new_with_base_url(
            "k".to_string(),
            "http://localhost:9000/".to_string(),
            Duration::from_secs(1),
        );
        assert_eq!(
            src.build_quote_url("XAU", "USD"),
            "http://localhost:9000/api/XAU/USD"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let src = GoldApiSource::new("super-secret".to_string(), Duration::from_secs(10));
        let dbg = format!("{src:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("<REDACTED>"));
    }

    #[test]
    fn default_base_url_is_goldapi() {
        let src = GoldApiSource::new("k".to_string(), Duration::from_secs(10));
        assert_eq!(src.build_quote_url("XAG", "EUR"), "https://www.goldapi.io/api/XAG/EUR");
    }
}
