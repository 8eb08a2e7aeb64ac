//! Sticky known-bad provider cache.
//!
//! When a provider returns an unrecoverable error class (access refused),
//! it is flagged here and skipped by every subsequent request until
//! `reset()` or process exit. Losing the flags only costs latency, never
//! correctness, so this stays a best-effort set behind a plain mutex.

use std::collections::HashSet;
use std::sync::Mutex;

/// Process-wide map from provider name to a "known failing" flag.
///
/// Owned explicitly and passed into the selector at construction, so tests
/// can reset it between cases without restarting the process.
#[derive(Debug, Default)]
pub struct ProviderHealth {
    known_bad: Mutex<HashSet<String>>,
}

impl ProviderHealth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag a provider as known-bad. Idempotent.
    pub fn mark_bad(&self, provider: &str) {
        self.known_bad.lock().unwrap().insert(provider.to_string());
    }

    /// Whether the provider should be skipped without an attempt.
    pub fn is_bad(&self, provider: &str) -> bool {
        self.known_bad.lock().unwrap().contains(provider)
    }

    /// Clear all flags.
    pub fn reset(&self) {
        self.known_bad.lock().unwrap().clear();
    }
}
