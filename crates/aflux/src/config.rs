//! Client configuration.
//!
//! [`ClientConfig`] holds everything a query needs besides its predicates:
//! where the AFLUX endpoint lives, how many records to request per page,
//! which catalogs to search and how long to wait on the network.

use serde::{Deserialize, Serialize};

/// Base address of the public AFLUX endpoint.
pub const DEFAULT_SERVER: &str = "http://aflowlib.duke.edu/search/API/?";

/// Records requested per page unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 100;

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

/// Configuration shared by every query built from it.
///
/// # Example
///
/// ```
/// use aflux::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_batch_size(20)
///     .with_catalog(["icsd", "lib2"]);
/// assert_eq!(config.batch_size, 20);
/// assert_eq!(config.catalog, vec!["icsd", "lib2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint prefix; the matchbook is appended verbatim.
    #[serde(default = "default_server")]
    pub server: String,

    /// Records per page (`k` in `paging(n,k)`). Zero is treated as one.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Catalog labels such as `icsd` or `lib1`; empty searches everything.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalog: Vec<String>,

    /// Connection timeout in milliseconds (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,

    /// Request timeout in milliseconds (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            batch_size: DEFAULT_BATCH_SIZE,
            catalog: Vec::new(),
            connect_timeout_ms: None,
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the endpoint prefix.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Set the page size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the catalog labels.
    pub fn with_catalog<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.connect_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    /// The page size actually requested.
    pub fn page_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
