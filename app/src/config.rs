//! Client configuration and retry policy

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public alquran.cloud endpoint
pub const DEFAULT_BASE_URL: &str = "http://api.alquran.cloud/v1";

pub const ENV_BASE_URL: &str = "ALQURAN_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "ALQURAN_TIMEOUT_SECS";
pub const ENV_RETRY_ATTEMPTS: &str = "ALQURAN_RETRY_ATTEMPTS";
pub const ENV_RETRY_BACKOFF_MS: &str = "ALQURAN_RETRY_BACKOFF_MS";

/// How many times a request is attempted and how long to wait in between.
///
/// The default makes one retry immediately after a failure (two attempts total).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self { max_attempts, backoff }
    }

    /// Attempt budget, never less than one
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before attempt `next_attempt` (1-based), growing linearly
    pub fn delay_before(&self, next_attempt: u32) -> Duration {
        self.backoff * next_attempt.saturating_sub(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` leaves the transport default in place
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Client settings shared by the binaries; every flag can also come from the environment
#[derive(Debug, Clone, clap::Args)]
pub struct ClientArgs {
    /// Base URL of the upstream API
    #[arg(long, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,

    /// Attempts per request, the first one included
    #[arg(long, env = ENV_RETRY_ATTEMPTS, default_value_t = 2)]
    pub retry_attempts: u32,

    /// Backoff step between attempts, in milliseconds
    #[arg(long, env = ENV_RETRY_BACKOFF_MS, default_value_t = 0)]
    pub retry_backoff_ms: u64,
}

impl TryFrom<ClientArgs> for ClientConfig {
    type Error = ConfigError;

    fn try_from(args: ClientArgs) -> Result<Self, Self::Error> {
        let base_url = args.api_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ConfigError::InvalidValue { key: ENV_BASE_URL, value: args.api_url });
        }

        let backoff = Duration::from_millis(args.retry_backoff_ms);
        Ok(Self {
            base_url: base_url.to_string(),
            timeout: args.timeout_secs.map(Duration::from_secs),
            retry: RetryPolicy::new(args.retry_attempts, backoff),
        })
    }
}
