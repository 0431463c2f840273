// Transport configuration for building reqwest::Client instances.
//
// The Sure Petcare cloud sits behind a public TLS endpoint, so there is
// no certificate-mode switching here -- just timeout and user-agent
// settings shared by every client.

use std::time::Duration;

use crate::error::Error;

/// Default per-request timeout. The cloud usually answers well under a
/// second; 15 s covers its slow tail without hanging callers.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("surehub-rs/", env!("CARGO_PKG_VERSION"));

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
