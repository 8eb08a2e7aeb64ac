//! Shared HTTP plumbing for the REST providers.

use super::provider::ProviderError;
use std::time::Duration;

pub(crate) const USER_AGENT: &str = "MoonfeedDashboard/0.1";

/// Build a blocking client with the feed's timeout and user agent.
pub(crate) fn build_client(timeout: Duration) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .expect("failed to build HTTP client")
}

/// Map an HTTP status to the provider error taxonomy.
///
/// 401/403 mean the provider is deliberately refusing us; 429 is transient
/// and honors the `retry-after` header when present; any other non-success
/// status counts as the service being down.
pub(crate) fn check_status(resp: &reqwest::blocking::Response) -> Result<(), ProviderError> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ProviderError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ProviderError::RateLimited { retry_after_secs });
    }

    if !status.is_success() {
        return Err(ProviderError::Unavailable(format!("HTTP {status}")));
    }

    Ok(())
}

/// Map a transport-level reqwest failure (connect, timeout, TLS).
pub(crate) fn transport_error(err: reqwest::Error) -> ProviderError {
    ProviderError::Unavailable(err.to_string())
}

/// Convert a millisecond unix timestamp to a calendar date.
pub(crate) fn date_from_millis(ts_ms: i64) -> Result<chrono::NaiveDate, ProviderError> {
    chrono::DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.naive_utc().date())
        .ok_or_else(|| ProviderError::Malformed(format!("invalid timestamp: {ts_ms}")))
}
