//! mv-md
//!
//! Spot-price market data for the metals desk.
//!
//! This crate owns the metal table, the normalized [`Quote`] schema, the
//! upstream provider boundary (GoldAPI.io) and the synthetic fallback
//! generator. It does **not** serve HTTP; `mv-daemon` wraps [`PriceFetcher`].

pub mod fetcher;
pub mod goldapi;
pub mod metal;
pub mod mock;
pub mod normalizer;
pub mod provider;
pub mod quote;

pub use fetcher::{usable_api_key, FetcherConfig, PriceFetcher, PLACEHOLDER_API_KEY};
pub use goldapi::GoldApiSource;
pub use metal::{Metal, MetalTable};
pub use mock::{BasePrices, MockGenerator, RandomSource, SeededRandom, ThreadRandom};
pub use provider::{PriceError, QuoteSource};
pub use quote::{Quote, QuoteStatus};
