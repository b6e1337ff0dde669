//! Synthetic quote generation.
//!
//! Used whenever a live quote cannot be produced. Quotes are a random walk
//! around a fixed base price per metal, tagged `mock_data`.
//!
//! Randomness is drawn through [`RandomSource`] in a fixed order
//! (price variation, percent change, high factor, low factor) so a seeded
//! source reproduces the same quote.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::metal::{display_name, Metal};
use crate::normalizer::iso8601;
use crate::quote::{round2, Quote, QuoteStatus};

pub const MOCK_SOURCE_NAME: &str = "Mock Generator";

/// Base price used for symbols missing from the table.
pub const DEFAULT_BASE_PRICE: f64 = 1000.0;

const PRICE_VARIATION: (f64, f64) = (-0.02, 0.02);
const CHANGE_PCT_RANGE: (f64, f64) = (-2.5, 2.5);
const HIGH_FACTOR: (f64, f64) = (1.005, 1.015);
const LOW_FACTOR: (f64, f64) = (0.985, 0.995);

// ---------------------------------------------------------------------------
// Random source
// ---------------------------------------------------------------------------

/// Uniform random draws for the generator.
pub trait RandomSource: Send + Sync {
    /// A uniform sample in `[low, high]`.
    fn uniform(&self, low: f64, high: f64) -> f64;
}

/// Production source backed by rand's thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        rand::rng().random_range(low..=high)
    }
}

/// Deterministic source for tests and reproducible demos.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(low..=high)
    }
}

// ---------------------------------------------------------------------------
// Base prices
// ---------------------------------------------------------------------------

/// Per-metal anchor prices for synthetic quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePrices {
    pub gold: f64,
    pub silver: f64,
    pub platinum: f64,
    pub palladium: f64,
    pub copper: f64,
    /// Anchor for symbols outside the metal table.
    pub fallback: f64,
}

impl Default for BasePrices {
    fn default() -> Self {
        Self {
            gold: 2350.0,
            silver: 28.50,
            platinum: 1050.0,
            palladium: 1150.0,
            copper: 4.25,
            fallback: DEFAULT_BASE_PRICE,
        }
    }
}

impl BasePrices {
    pub fn for_symbol(&self, symbol: &str) -> f64 {
        match Metal::from_code(symbol) {
            Some(Metal::Gold) => self.gold,
            Some(Metal::Silver) => self.silver,
            Some(Metal::Platinum) => self.platinum,
            Some(Metal::Palladium) => self.palladium,
            Some(Metal::Copper) => self.copper,
            None => self.fallback,
        }
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MockGenerator {
    base_prices: BasePrices,
    rng: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for MockGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGenerator")
            .field("base_prices", &self.base_prices)
            .finish_non_exhaustive()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(BasePrices::default(), Arc::new(ThreadRandom))
    }
}

impl MockGenerator {
    pub fn new(base_prices: BasePrices, rng: Arc<dyn RandomSource>) -> Self {
        Self { base_prices, rng }
    }

    /// Generate a synthetic quote stamped with the current time.
    pub fn generate(&self, symbol: &str, currency: &str, error: Option<&str>) -> Quote {
        self.generate_at(symbol, currency, error, Utc::now())
    }

    /// Generate a synthetic quote stamped with `now`.
    pub fn generate_at(
        &self,
        symbol: &str,
        currency: &str,
        error: Option<&str>,
        now: DateTime<Utc>,
    ) -> Quote {
        let base = self.base_prices.for_symbol(symbol);

        let variation = self.rng.uniform(PRICE_VARIATION.0, PRICE_VARIATION.1);
        let current = base * (1.0 + variation);

        let change_pct = self.rng.uniform(CHANGE_PCT_RANGE.0, CHANGE_PCT_RANGE.1);
        let previous = current / (1.0 + change_pct / 100.0);
        let change = current - previous;

        let high = current * self.rng.uniform(HIGH_FACTOR.0, HIGH_FACTOR.1);
        let low = current * self.rng.uniform(LOW_FACTOR.0, LOW_FACTOR.1);

        Quote {
            symbol: symbol.to_string(),
            name: display_name(symbol),
            price: round2(current),
            prev_close_price: round2(previous),
            ch: round2(change),
            change_pct: round2(change_pct),
            high: round2(high),
            low: round2(low),
            // open is the previous close, not an independent draw
            open: round2(previous),
            currency: currency.to_string(),
            timestamp: iso8601(now),
            status: QuoteStatus::MockData,
            data_source: MOCK_SOURCE_NAME.to_string(),
            error: error.map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Always returns the midpoint of the requested range.
    struct Midpoint;

    impl RandomSource for Midpoint {
        fn uniform(&self, low: f64, high: f64) -> f64 {
            low + (high - low) * 0.5
        }
    }

    fn is_2dp(v: f64) -> bool {
        round2(v) == v
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn midpoint_source_yields_exact_values() {
        let generator = MockGenerator::new(BasePrices::default(), Arc::new(Midpoint));
        let q = generator.generate_at("XAU", "USD", None, fixed_now());

        assert_eq!(q.price, 2350.0);
        assert_eq!(q.change_pct, 0.0);
        assert_eq!(q.prev_close_price, 2350.0);
        assert_eq!(q.ch, 0.0);
        assert_eq!(q.high, 2373.5);
        assert_eq!(q.low, 2326.5);
        assert_eq!(q.open, 2350.0);
        assert_eq!(q.timestamp, "2024-05-01T12:00:00.000Z");
        assert_eq!(q.status, QuoteStatus::MockData);
        assert_eq!(q.data_source, "Mock Generator");
        assert!(q.error.is_none());
    }

    #[test]
    fn unknown_symbol_uses_fallback_base_and_raw_name() {
        let generator = MockGenerator::new(BasePrices::default(), Arc::new(Midpoint));
        let q = generator.generate_at("XRH", "USD", None, fixed_now());
        assert_eq!(q.price, 1000.0);
        assert_eq!(q.name, "XRH");
    }

    #[test]
    fn same_seed_same_quote() {
        let a = MockGenerator::new(BasePrices::default(), Arc::new(SeededRandom::new(7)));
        let b = MockGenerator::new(BasePrices::default(), Arc::new(SeededRandom::new(7)));
        for m in Metal::ALL {
            assert_eq!(
                a.generate_at(m.code(), "USD", None, fixed_now()),
                b.generate_at(m.code(), "USD", None, fixed_now())
            );
        }
    }

    #[test]
    fn error_is_attached_verbatim() {
        let generator = MockGenerator::default();
        let q = generator.generate("XAG", "GBP", Some("API key not configured."));
        assert_eq!(q.error.as_deref(), Some("API key not configured."));
        assert_eq!(q.currency, "GBP");
        assert_eq!(q.name, "Silver");
    }

    #[test]
    fn sampled_quotes_hold_invariants() {
        let generator = MockGenerator::new(BasePrices::default(), Arc::new(SeededRandom::new(42)));
        let base = BasePrices::default();

        for i in 0..2_000 {
            let m = Metal::ALL[i % Metal::ALL.len()];
            let q = generator.generate(m.code(), "USD", None);

            for v in [q.price, q.prev_close_price, q.ch, q.change_pct, q.high, q.low, q.open] {
                assert!(is_2dp(v), "{v} not rounded to 2dp");
            }
            assert_eq!(q.open, q.prev_close_price);
            assert!(
                (q.price - q.prev_close_price - q.ch).abs() <= 0.016,
                "ch {} vs price-prev {}",
                q.ch,
                q.price - q.prev_close_price
            );
            assert!(q.high >= q.low, "high {} < low {}", q.high, q.low);
            assert!(q.price >= 0.0 && q.low >= 0.0);
            assert!((-2.5..=2.5).contains(&q.change_pct));

            let anchor = base.for_symbol(m.code());
            assert!(q.price >= round2(anchor * 0.98) && q.price <= round2(anchor * 1.02));
        }
    }
}
