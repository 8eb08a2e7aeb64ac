//! Serializable feed configuration.
//!
//! Every retry/backoff/deadline tunable lives here with a documented
//! default instead of being scattered as literals through the fetch path.
//! The whole tree loads from TOML for the CLI and deserializes with
//! defaults for any omitted section.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Which concrete providers to build, in priority order.
///
/// The chain is configuration, not code: reordering or removing entries
/// changes the fallback order without touching the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderKind {
    CoinGecko,
    Bybit,
    CryptoCompare,
}

/// Retry, backoff, and deadline tunables for the source selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Attempts per provider for retryable failures (default 2).
    pub max_attempts: u32,

    /// Delay before the first retry (default 250ms); doubles per attempt.
    pub initial_backoff_ms: u64,

    /// Ceiling on a single backoff delay (default 2s).
    pub max_backoff_ms: u64,

    /// Budget for the whole request across all providers, attempts, and
    /// backoff sleeps (default 8s) so the UI stays responsive.
    pub overall_deadline_ms: u64,

    /// Upper bound on the requested point count (default 1000).
    pub max_limit: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
            overall_deadline_ms: 8_000,
            max_limit: 1_000,
        }
    }
}

impl SelectorConfig {
    /// Bounded exponential backoff delay for a retry (1-indexed attempt:
    /// attempt 2 is the first retry).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(2).min(16);
        let base = self.initial_backoff_ms.saturating_mul(1 << exp);
        Duration::from_millis(base.min(self.max_backoff_ms))
    }

    pub fn overall_deadline(&self) -> Duration {
        Duration::from_millis(self.overall_deadline_ms)
    }
}

/// Tunables for the synthetic random walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Hard cap on generated points (default 365).
    pub max_points: usize,

    /// Bound on the daily close-to-close move, as a fraction (default 0.05).
    pub max_daily_move: f64,

    /// Bound on the extra high/low wick beyond the open/close body,
    /// as a fraction (default 0.02).
    pub max_wick: f64,

    /// Volume anchor, scaled by a random multiplier in [0.5, 2.0]
    /// (default 1,000,000).
    pub baseline_volume: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            max_points: 365,
            max_daily_move: 0.05,
            max_wick: 0.02,
            baseline_volume: 1_000_000.0,
        }
    }
}

/// Top-level configuration: provider chain, HTTP settings, and tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Ordered provider chain. First entry is the `Live` tier.
    pub providers: Vec<ProviderKind>,

    /// Per-HTTP-request timeout (default 10s).
    pub http_timeout_secs: u64,

    /// Base URL overrides, mainly for tests and self-hosted mirrors.
    pub coingecko_base_url: String,
    pub bybit_base_url: String,
    pub cryptocompare_base_url: String,

    pub selector: SelectorConfig,
    pub synthetic: SyntheticConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            providers: vec![
                ProviderKind::CoinGecko,
                ProviderKind::Bybit,
                ProviderKind::CryptoCompare,
            ],
            http_timeout_secs: 10,
            coingecko_base_url: "https://api.coingecko.com/api/v3".to_string(),
            bybit_base_url: "https://api.bybit.com".to_string(),
            cryptocompare_base_url: "https://min-api.cryptocompare.com".to_string(),
            selector: SelectorConfig::default(),
            synthetic: SyntheticConfig::default(),
        }
    }
}

impl FeedConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Load a config from a TOML file. Missing keys fall back to defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(String, String),

    #[error("failed to parse config: {0}")]
    Parse(String),
}
