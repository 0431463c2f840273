// Sure Petcare cloud HTTP client
//
// Wraps `reqwest::Client` with bearer-token lifecycle, per-resource
// response caching, and conditional requests via ETags. Endpoint
// wrappers live in endpoints.rs to keep this module focused on
// transport mechanics.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, ETAG, IF_NONE_MATCH};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::auth::{Credentials, token_seems_valid};
use crate::error::Error;
use crate::models::LoginEnvelope;
use crate::resources;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Sure Petcare cloud API.
///
/// Holds the bearer token, a per-resource cache of the last raw JSON
/// response, and the matching ETags for conditional requests. All
/// mutation happens through `&mut self` -- there is one writer, the
/// owner, and no internal synchronization.
pub struct SureApiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    token: Option<String>,
    device_id: String,
    resources: HashMap<String, Value>,
    etags: HashMap<String, String>,
}

impl SureApiClient {
    /// Create a client against the production API base.
    pub fn new(credentials: Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        Self::with_base_url(Url::parse(resources::BASE_URL)?, credentials, transport)
    }

    /// Create a client against an explicit API base (tests, proxies).
    ///
    /// A supplied token that fails the shape check is discarded with a
    /// warning; email/password credentials log in lazily instead.
    pub fn with_base_url(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;

        let token = match &credentials {
            Credentials::Token(token) if token_seems_valid(token) => Some(token.clone()),
            Credentials::Token(_) => {
                warn!("supplied auth token fails the shape check -- ignoring it");
                None
            }
            Credentials::EmailPassword { .. } => None,
        };

        Ok(Self {
            http,
            base_url,
            credentials,
            token,
            device_id: uuid::Uuid::new_v4().to_string(),
            resources: HashMap::new(),
            etags: HashMap::new(),
        })
    }

    /// The auth token currently in use, if any.
    pub fn auth_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Read-only view of the last raw JSON response per resource path.
    pub fn resources(&self) -> &HashMap<String, Value> {
        &self.resources
    }

    /// Cached raw response for one resource path.
    pub fn cached(&self, resource: &str) -> Option<&Value> {
        self.resources.get(resource)
    }

    // ── Token lifecycle ──────────────────────────────────────────────

    /// Acquire a fresh token via `POST auth/login`.
    ///
    /// Requires email/password credentials; a token-only client cannot
    /// renew and gets [`Error::NoCredentials`].
    pub async fn login(&mut self) -> Result<(), Error> {
        let Credentials::EmailPassword { email, password } = &self.credentials else {
            return Err(Error::NoCredentials);
        };

        let url = self.base_url.join(resources::AUTH_LOGIN)?;
        debug!("logging in at {}", url);

        let body = json!({
            "email_address": email,
            "password": password.expose_secret(),
            "device_id": self.device_id,
        });

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let envelope: LoginEnvelope =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        self.token = Some(envelope.data.token);
        debug!("login successful");
        Ok(())
    }

    async fn ensure_token(&mut self) -> Result<String, Error> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        self.login().await?;
        self.token.clone().ok_or(Error::NoCredentials)
    }

    // ── Request mechanics ────────────────────────────────────────────

    /// Issue one authenticated request against a resource path.
    ///
    /// On 2xx the parsed body is cached under the resource path (with
    /// its ETag, if any) and returned. A 304 serves the cached copy. A
    /// 401 discards the token and surfaces as [`Error::TokenExpired`];
    /// any other failure status is soft -- logged, `Ok(None)`, degraded
    /// data is the caller's concern. Transport failures are `Err`.
    pub async fn call(
        &mut self,
        method: Method,
        resource: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, Error> {
        let token = self.ensure_token().await?;
        let url = self.base_url.join(resource)?;
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"));

        if let Some(etag) = self.etags.get(resource) {
            request = request.header(IF_NONE_MATCH, etag.clone());
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if status == StatusCode::NOT_MODIFIED {
            debug!(resource, "not modified -- serving cached copy");
            return Ok(self.resources.get(resource).cloned());
        }

        if status == StatusCode::UNAUTHORIZED {
            self.token = None;
            return Err(Error::TokenExpired);
        }

        if !status.is_success() {
            warn!(resource, %status, "request failed");
            return Ok(None);
        }

        let etag = resp
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = resp.text().await.map_err(Error::Transport)?;
        let parsed: Value = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })?;

        self.resources.insert(resource.to_owned(), parsed.clone());
        if let Some(etag) = etag {
            self.etags.insert(resource.to_owned(), etag);
        }

        Ok(Some(parsed))
    }
}
