//! # AFLUX - Search client for the AFLOW materials database
//!
//! AFLUX is the query language of the AFLOW search API. This crate builds
//! AFLUX queries from typed keywords and walks their results lazily, one page
//! at a time. It provides:
//!
//! - The keyword catalog and expression engine (re-exported from
//!   `aflux-keywords`)
//! - [`Query`]: assembly, finalization, pagination, indexing and slicing
//! - [`Entry`]: decoded material records with lazily loaded keywords
//! - [`EntryFiles`] / [`AflowFile`]: access to the files of an entry
//! - [`Transport`]: the seam to the network, with a blocking
//!   [`HttpTransport`] behind the default `http` feature
//!
//! ## Quick Start
//!
//! ```no_run
//! use aflux::catalog::{AGL_THERMAL_CONDUCTIVITY_300K as KAPPA, EGAP};
//! use aflux::{search, ClientConfig, Dir};
//!
//! let config = ClientConfig::default().with_batch_size(20);
//! let query = search(&config)?
//!     .select([KAPPA])?
//!     .filter(EGAP.gt(6))?
//!     .orderby(KAPPA, Dir::Desc)?;
//!
//! for entry in query.take(40) {
//!     let entry = entry?;
//!     println!("{} {:?}", entry, entry.get(KAPPA));
//! }
//! # Ok::<(), aflux::QueryError>(())
//! ```
//!
//! ## Pagination
//!
//! Results are requested `batch_size` at a time with `paging(n,k)`. Page `n`
//! holds positions `k*(n-1)` to `k*n - 1`; descending queries request
//! negative page numbers. The first page received fixes the total count.
//! Pages are cached for the lifetime of the query and shared with every copy
//! produced by [`Query::get`] and [`Query::slice`].

pub mod caster;
pub mod config;
pub mod control;
pub mod entry;
pub mod error;
pub mod files;
#[cfg(feature = "http")]
pub mod http;
pub mod transport;

pub use aflux_keywords as keywords;
pub use aflux_keywords::catalog;
pub use aflux_keywords::{
    Conjunction, Dir, ExprError, Expression, Field, Number, Op, Operand, OrderBy, Status,
    ValueType, WireType,
};

pub use caster::{Kpoints, Value};
pub use config::{ClientConfig, DEFAULT_BATCH_SIZE, DEFAULT_SERVER};
pub use control::{Built, Query};
pub use entry::Entry;
pub use error::{FetchError, FileError, QueryError, Rejected, Result};
pub use files::{AflowFile, EntryFiles};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use transport::{Page, Transport};

/// Starts a query against the configured AFLUX endpoint over HTTP.
#[cfg(feature = "http")]
pub fn search(config: &ClientConfig) -> Result<Query> {
    let transport = HttpTransport::from_config(config)?;
    Ok(Query::from_config(config, std::rc::Rc::new(transport)))
}
