//! HTTP client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API token on every OSDI request.
pub const API_TOKEN_HEADER: &str = "OSDI-API-Token";

/// Settings for the HTTP client behind [`crate::OsdiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsdiClientConfig {
    /// Upper bound for a single page request, body included (in seconds).
    pub request_timeout_secs: u64,
    /// Upper bound for establishing a connection (in seconds).
    pub connect_timeout_secs: u64,
    /// `User-Agent` sent to the remote.
    pub user_agent: String,
}

impl Default for OsdiClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!("osdi-exchange/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl OsdiClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
