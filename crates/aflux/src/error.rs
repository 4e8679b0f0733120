//! Error types for queries, page fetches and entry resources.

use std::path::PathBuf;

use aflux_keywords::ExprError;

use crate::control::Query;
use thiserror::Error;

/// Boxed error returned by a transport backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to obtain or decode one response.
///
/// Every variant names the requested URL; variants produced after the body
/// arrived also carry the raw body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport could not be set up.
    #[error("cannot set up transport: {0}")]
    Setup(#[source] BoxError),

    /// The request did not complete.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} returned status {status}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The body is not valid JSON.
    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body is valid JSON but not an object.
    #[error("response from {url} is not a JSON object")]
    NotAnObject { url: String, body: String },

    /// No key of the page has the `"<i> of <N>"` form.
    #[error("response from {url} has no record count; first key is {key:?}")]
    MalformedCount { url: String, key: String },
}

impl FetchError {
    /// Wraps a backend error raised while requesting `url`.
    pub fn transport(url: &str, source: impl Into<BoxError>) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// The URL the failure relates to, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Setup(_) => None,
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. }
            | FetchError::NotAnObject { url, .. }
            | FetchError::MalformedCount { url, .. } => Some(url),
        }
    }

    /// The raw response body, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            FetchError::Status { body, .. }
            | FetchError::Decode { body, .. }
            | FetchError::NotAnObject { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Errors raised by a [`Query`](crate::Query).
#[derive(Debug, Error)]
pub enum QueryError {
    /// A filter expression could not be serialized.
    #[error(transparent)]
    Expr(#[from] ExprError),

    /// A mutation was attempted after the query was finalized.
    #[error("query is finalized; `{op}` is no longer allowed")]
    Finalized { op: &'static str },

    /// A page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A cached page lacks the record the cursor points at.
    #[error("page {page} has no record {key:?}")]
    MissingRecord { key: String, page: i64 },
}

/// A builder call refused by a finalized query.
///
/// The query comes back unchanged so it can still be read from.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Rejected {
    pub error: QueryError,
    pub query: Query,
}

impl Rejected {
    pub fn into_query(self) -> Query {
        self.query
    }
}

impl From<Rejected> for QueryError {
    fn from(rejected: Rejected) -> Self {
        rejected.error
    }
}

/// Errors raised while reaching an entry's remote resources: lazily loaded
/// keywords and the files stored under its `aurl`.
#[derive(Debug, Error)]
pub enum FileError {
    /// A pattern selects more than one file.
    #[error("pattern {pattern:?} matches more than one file: {}", matches.join(", "))]
    Ambiguous {
        pattern: String,
        matches: Vec<String>,
    },

    /// A pattern selects no file.
    #[error("no file matches {pattern:?}")]
    NoMatch { pattern: String },

    /// A positional lookup is past the end of the file list.
    #[error("file index {index} out of range for {len} files")]
    IndexOutOfRange { index: usize, len: usize },

    /// A glob pattern could not be compiled.
    #[error("invalid file pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The entry carries no `aurl`, so nothing can be fetched for it.
    #[error("entry has no aurl")]
    MissingAurl,

    /// The remote resource could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A downloaded file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
