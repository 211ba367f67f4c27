//! Connection settings for the remote user collection.
//!
//! Values come from command-line flags, then environment variables, then the
//! defaults below.

use std::time::Duration;

use clap::Args;
use url::Url;

/// Base URL used when neither `--base-url` nor `USER_ADMIN_BASE_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ClientConfig {
    /// Base URL of the API; the collection lives at `{base-url}/users`.
    #[arg(
        long,
        env = "USER_ADMIN_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    pub base_url: Url,

    /// Per-request timeout in seconds. Unset or 0 means no timeout.
    #[arg(long, env = "USER_ADMIN_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: None,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
