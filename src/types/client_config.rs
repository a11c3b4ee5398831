//! Configuration of the [`crate::PvgisTmy`] client.

use bon::Builder;
use std::time::Duration;

/// Base URL of the PVGIS 5.2 API.
pub const DEFAULT_BASE_URL: &str = "https://re.jrc.ec.europa.eu/api/v5_2";

/// How often a failed TMY request is retried.
///
/// Only transient failures are retried: transport errors (connection, timeout) and
/// HTTP 5xx responses. The wait before retry `n` is `initial_backoff * multiplier^(n - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. At least 1.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: u32,
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            multiplier: 1,
        }
    }

    /// The wait after failed attempt number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            multiplier: 2,
        }
    }
}

/// Client configuration.
///
/// # Examples
///
/// ```
/// use pvgis_tmy::{ClientConfig, RetryPolicy};
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .timeout(Duration::from_secs(20))
///     .retry_policy(RetryPolicy::none())
///     .build();
/// assert_eq!(config.base_url, "https://re.jrc.ec.europa.eu/api/v5_2");
/// assert_eq!(config.retry_policy.max_attempts, 1);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClientConfig {
    /// API root; the TMY endpoint is `{base_url}/tmy`.
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Timeout of a single request attempt.
    #[builder(default = Duration::from_secs(60))]
    pub timeout: Duration,
    #[builder(default)]
    pub retry_policy: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::builder().build()
    }
}
