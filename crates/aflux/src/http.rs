//! Blocking HTTP transport.
//!
//! Only available with the `http` feature (enabled by default).

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::transport::Transport;

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// [`Transport`] over a blocking `reqwest` client.
///
/// One GET per call; failures are reported, never retried.
pub struct HttpTransport {
    client: Client,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the configured timeouts.
    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        let connect_timeout = Duration::from_millis(
            config
                .connect_timeout_ms
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS),
        );
        let request_timeout = Duration::from_millis(
            config
                .request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        );

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| FetchError::Setup(Box::new(e)))?;

        Ok(Self {
            client,
            request_timeout,
        })
    }

    /// Create a transport with default timeouts.
    pub fn new() -> Result<Self, FetchError> {
        Self::from_config(&ClientConfig::default())
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::transport(url, e))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
