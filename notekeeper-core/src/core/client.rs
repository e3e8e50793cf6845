//! Blocking HTTP transport to the notes service.
//!
//! One [`ApiClient`] carries the cookie store for the session, so the account
//! endpoints and the notes endpoints must go through clones of the same client.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{NotekeeperError, Result};

/// Default address of a locally run notes service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Session-holding client for the notes service.
///
/// Clones share the connection pool and cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client with a cookie store.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::Validation`] for a base URL that is not
    /// http(s), or [`NotekeeperError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// The normalised service address requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Sends `request` and returns the body of a 2xx response as text.
    ///
    /// Non-success statuses become [`NotekeeperError::RemoteRejection`] with the
    /// body's message, if any.
    pub(crate) fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        debug!("{} <- {} byte body", status, body.len());
        if status.is_success() {
            Ok(body)
        } else {
            Err(rejection(status.as_u16(), &body))
        }
    }

    /// Sends `request` and decodes the 2xx body as `T`.
    pub(crate) fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.execute(request)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Trims trailing slashes and checks the scheme.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(NotekeeperError::Validation(format!(
            "Server URL must start with http:// or https://: {raw}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Builds the rejection error for a non-success response, lifting `message`
/// (or the service's `error` key) out of a JSON body.
pub(crate) fn rejection(status: u16, body: &str) -> NotekeeperError {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["message", "error"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
    });
    NotekeeperError::RemoteRejection { status, message }
}
