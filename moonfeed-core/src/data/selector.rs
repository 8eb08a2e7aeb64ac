//! Source selector — ordered provider fallback with a synthetic last resort.
//!
//! Walks the configured provider chain strictly sequentially: known-bad
//! providers are skipped, retryable failures get bounded backoff retries,
//! and an overall deadline caps total latency. The first success wins and
//! is tagged with its provenance tier; if every provider is exhausted the
//! synthetic generator supplies the series, so `fetch` never fails.

use super::bybit::BybitProvider;
use super::canonicalize::canonicalize;
use super::coingecko::CoinGeckoProvider;
use super::cryptocompare::CryptoCompareProvider;
use super::health::ProviderHealth;
use super::provider::{FetchResult, PriceProvider, Provenance, ProviderError};
use super::synthetic::SyntheticGenerator;
use crate::config::{FeedConfig, ProviderKind, SelectorConfig};
use crate::domain::{Asset, PriceSeries};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Name attached to results produced by the synthetic generator.
pub const SYNTHETIC_PROVIDER_NAME: &str = "synthetic";

pub struct SourceSelector {
    providers: Vec<Box<dyn PriceProvider>>,
    health: Arc<ProviderHealth>,
    config: SelectorConfig,
    synthetic: SyntheticGenerator,
}

impl SourceSelector {
    pub fn new(
        providers: Vec<Box<dyn PriceProvider>>,
        health: Arc<ProviderHealth>,
        config: SelectorConfig,
        synthetic: SyntheticGenerator,
    ) -> Self {
        Self {
            providers,
            health,
            config,
            synthetic,
        }
    }

    /// Build the selector with the chain described by a [`FeedConfig`].
    pub fn from_config(config: &FeedConfig, health: Arc<ProviderHealth>) -> Self {
        let providers = config
            .providers
            .iter()
            .map(|kind| -> Box<dyn PriceProvider> {
                match kind {
                    ProviderKind::CoinGecko => Box::new(CoinGeckoProvider::from_config(config)),
                    ProviderKind::Bybit => Box::new(BybitProvider::from_config(config)),
                    ProviderKind::CryptoCompare => {
                        Box::new(CryptoCompareProvider::from_config(config))
                    }
                }
            })
            .collect();

        Self::new(
            providers,
            health,
            config.selector.clone(),
            SyntheticGenerator::new(config.synthetic.clone()),
        )
    }

    /// Fetch up to `limit` trailing daily candles for `asset`.
    ///
    /// Never fails: exhausting the provider chain falls through to the
    /// synthetic generator. `limit` is clamped to `1..=max_limit`.
    pub fn fetch(&self, asset: Asset, limit: usize) -> FetchResult {
        let limit = limit.clamp(1, self.config.max_limit);
        let deadline = Instant::now() + self.config.overall_deadline();

        for (tier, provider) in self.providers.iter().enumerate() {
            let name = provider.name();

            if self.health.is_bad(name) {
                debug!(provider = name, "skipping known-bad provider");
                continue;
            }
            if Instant::now() >= deadline {
                warn!("request deadline exhausted before trying {name}");
                break;
            }

            match self.try_provider(provider.as_ref(), asset, limit, deadline) {
                Ok(candles) => {
                    let provenance = if tier == 0 {
                        Provenance::Live
                    } else {
                        Provenance::Backup
                    };
                    info!(
                        provider = name,
                        %asset,
                        points = candles.len(),
                        ?provenance,
                        "fetch succeeded"
                    );
                    return FetchResult {
                        asset,
                        candles,
                        provenance,
                        provider: name.to_string(),
                    };
                }
                Err(ProviderError::Unauthorized) => {
                    warn!(provider = name, "access refused, benching provider");
                    self.health.mark_bad(name);
                }
                Err(e) => {
                    warn!(provider = name, error = %e, "provider failed, trying next");
                }
            }
        }

        warn!(%asset, "all providers exhausted, generating synthetic series");
        FetchResult {
            asset,
            candles: self.synthetic.generate(asset, limit),
            provenance: Provenance::Synthetic,
            provider: SYNTHETIC_PROVIDER_NAME.to_string(),
        }
    }

    /// Reset the shared health cache, un-benching every provider.
    pub fn reset_health(&self) {
        self.health.reset();
    }

    /// One provider, up to `max_attempts` tries for retryable failures.
    fn try_provider(
        &self,
        provider: &dyn PriceProvider,
        asset: Asset,
        limit: usize,
        deadline: Instant,
    ) -> Result<PriceSeries, ProviderError> {
        let mut last_error = None;

        for attempt in 1..=self.config.max_attempts {
            if attempt > 1 {
                let delay = self.config.backoff_for(attempt);
                if Instant::now() + delay >= deadline {
                    break;
                }
                debug!(
                    provider = provider.name(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "backing off before retry"
                );
                std::thread::sleep(delay);
            }

            match provider.try_fetch(asset, limit) {
                Ok(raw) => {
                    let series = canonicalize(raw, asset, limit);
                    if series.is_empty() {
                        // A provider answering with zero usable points is as
                        // good as a format change: skip it, don't retry.
                        return Err(ProviderError::Malformed("no usable data points".into()));
                    }
                    return Ok(series);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_attempts => {
                    debug!(provider = provider.name(), attempt, error = %e, "retryable failure");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| ProviderError::Unavailable("attempt budget exhausted".into())))
    }
}
