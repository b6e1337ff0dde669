//! Shared runtime state for mv-daemon.
//!
//! Everything here is immutable after startup. Handlers receive
//! `State<Arc<AppState>>` from Axum; there are no locks on the request path.

use mv_config::ServiceConfig;
use mv_md::{FetcherConfig, MockGenerator, PriceFetcher};

// ---------------------------------------------------------------------------
// BuildInfo
// ---------------------------------------------------------------------------

/// Static build metadata, logged at startup.
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Handle shared (via `Arc`) across all Axum handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub build: BuildInfo,
    pub fetcher: PriceFetcher,
}

impl AppState {
    pub fn new(fetcher: PriceFetcher) -> Self {
        Self {
            build: BuildInfo {
                service: "mv-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            fetcher,
        }
    }

    /// Wire a GoldAPI-backed fetcher from resolved configuration.
    ///
    /// Falls back to a mock-only fetcher when the credential is missing or a
    /// placeholder.
    pub fn from_config(cfg: &ServiceConfig) -> Self {
        let fetcher_cfg = FetcherConfig {
            api_key: cfg.secrets.gold_api_key.clone(),
            base_url: cfg.gold_api_base_url.clone(),
            ..FetcherConfig::default()
        };
        Self::new(PriceFetcher::new(fetcher_cfg, MockGenerator::default()))
    }

    /// State with no upstream at all. Every price is synthetic.
    pub fn mock_only() -> Self {
        Self::new(PriceFetcher::mock_only(MockGenerator::default()))
    }
}
