// ── Runtime connection configuration ──
//
// Describes how to reach the Sure Petcare cloud. Carries credential
// data and connection tuning, never touches disk -- token persistence
// is the caller's concern.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use surehub_api::transport::DEFAULT_TIMEOUT;

/// How to authenticate with the cloud.
///
/// Core-level mirror of `surehub_api::Credentials`; this type is what
/// consumers construct, the facade translates it for the API client.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// A pre-acquired auth token.
    Token(String),
    /// Account email + password; the client logs in lazily.
    Credentials {
        email: String,
        password: SecretString,
    },
}

/// Configuration for one cloud connection.
///
/// Built by the consumer, passed to [`Surehub`](crate::Surehub) --
/// core never reads config files.
#[derive(Debug, Clone)]
pub struct SurehubConfig {
    /// API base URL. Only overridden for tests and proxies.
    pub base_url: Url,
    /// Authentication material.
    pub auth: AuthCredentials,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SurehubConfig {
    /// Config against the production API base with the default timeout.
    pub fn new(auth: AuthCredentials) -> Self {
        Self {
            base_url: Url::parse(surehub_api::resources::BASE_URL)
                .expect("default base URL is valid"),
            auth,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
