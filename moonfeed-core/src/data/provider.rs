//! Price provider trait and structured error taxonomy.
//!
//! The PriceProvider trait abstracts over REST data sources (CoinGecko,
//! Bybit, CryptoCompare) so the selector can walk an ordered chain and tests
//! can substitute scripted fakes.

use crate::domain::{Asset, PriceSeries};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified provider failure.
///
/// The class decides what the selector does next: `RateLimited` and
/// `Unavailable` are retried with backoff, `Malformed` skips to the next
/// provider, and `Unauthorized` additionally benches the provider for the
/// rest of the process lifetime.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider refused access (blocked or credentials required)")]
    Unauthorized,

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Whether the selector may spend another attempt on the same provider.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited { .. } | ProviderError::Unavailable(_)
        )
    }
}

/// Where returned data came from, carried end-to-end on every result.
///
/// The presentation layer maps each tier to one fixed notification message
/// and nothing else — provenance has no behavioral weight past this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provenance {
    /// Primary live source (first provider in the configured chain).
    Live,
    /// A live source further down the chain.
    Backup,
    /// Generated locally after every live source failed.
    Synthetic,
}

impl Provenance {
    /// Fixed user-facing notice for this tier.
    pub fn notice(&self) -> &'static str {
        match self {
            Provenance::Live => "Live market data loaded.",
            Provenance::Backup => {
                "Primary source unavailable — data loaded from a backup source."
            }
            Provenance::Synthetic => {
                "All data sources unavailable — showing synthetic demo data."
            }
        }
    }
}

/// Result of a fetch, created fresh per request and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub asset: Asset,
    pub candles: PriceSeries,
    pub provenance: Provenance,
    pub provider: String,
}

/// Trait for daily price-history providers.
///
/// Implementations perform one network fetch and classify every failure;
/// retry policy, health tracking, and fallback live in the selector above.
pub trait PriceProvider: Send + Sync {
    /// Stable identifier, used in logs, health flags, and FetchResult.
    fn name(&self) -> &str;

    /// Fetch up to `limit` trailing daily candles for `asset`.
    ///
    /// Providers may return fewer points than requested, unsorted or
    /// duplicated — the selector canonicalizes.
    fn try_fetch(&self, asset: Asset, limit: usize) -> Result<PriceSeries, ProviderError>;
}
