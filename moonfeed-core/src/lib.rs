//! Moonfeed Core — data acquisition for the crypto/lunar dashboard.
//!
//! This crate contains everything between the public REST APIs and the
//! presentation layer:
//! - Domain types (assets, daily candles)
//! - An ordered chain of price providers behind one trait
//! - A sticky provider-health cache
//! - The source selector: sequential fallback, bounded retries, deadline
//! - A synthetic random-walk generator as the guaranteed last resort
//! - Provenance tagging consumed by the dashboard's notification layer

pub mod config;
pub mod data;
pub mod domain;

pub use config::FeedConfig;
pub use data::{FetchResult, Provenance, ProviderHealth, SourceSelector, SyntheticGenerator};
pub use domain::{Asset, Candle, PriceSeries};
