//! Supported assets and their per-provider identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of assets the dashboard tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Asset {
    Bitcoin,
    Ethereum,
    Solana,
}

impl Asset {
    pub const ALL: [Asset; 3] = [Asset::Bitcoin, Asset::Ethereum, Asset::Solana];

    /// Exchange-style symbol used by kline endpoints and display tables.
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "BTCUSDT",
            Asset::Ethereum => "ETHUSDT",
            Asset::Solana => "SOLUSDT",
        }
    }

    /// CoinGecko coin id.
    pub fn coingecko_id(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "bitcoin",
            Asset::Ethereum => "ethereum",
            Asset::Solana => "solana",
        }
    }

    /// Bare ticker, used by CryptoCompare's `fsym` parameter.
    pub fn ticker(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "BTC",
            Asset::Ethereum => "ETH",
            Asset::Solana => "SOL",
        }
    }

    /// Anchor price (USD) for the synthetic random walk.
    pub fn baseline_price(&self) -> f64 {
        match self {
            Asset::Bitcoin => 45_000.0,
            Asset::Ethereum => 3_000.0,
            Asset::Solana => 100.0,
        }
    }

    /// Plausible USD price band; bars outside it are discarded as garbage.
    pub fn plausible_range(&self) -> (f64, f64) {
        match self {
            Asset::Bitcoin => (1.0, 1_000_000.0),
            Asset::Ethereum => (0.1, 100_000.0),
            Asset::Solana => (0.01, 10_000.0),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Asset::Bitcoin => "Bitcoin",
            Asset::Ethereum => "Ethereum",
            Asset::Solana => "Solana",
        };
        f.write_str(name)
    }
}

impl FromStr for Asset {
    type Err = UnknownAsset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "btc" | "btcusdt" => Ok(Asset::Bitcoin),
            "ethereum" | "eth" | "ethusdt" => Ok(Asset::Ethereum),
            "solana" | "sol" | "solusdt" => Ok(Asset::Solana),
            _ => Err(UnknownAsset(s.to_string())),
        }
    }
}

/// Parse error for asset names.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown asset '{0}' (supported: bitcoin, ethereum, solana)")]
pub struct UnknownAsset(pub String);
