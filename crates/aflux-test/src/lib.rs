//! Test harness for aflux clients.
//!
//! - [`FixtureTransport`]: an in-memory [`Transport`] that serves canned
//!   pages and resources and records every URL it was asked for
//! - [`material`], [`page`]: builders for AFLUX-shaped records and pages
//! - [`paper_fixture`]: the two descending pages of the heat-sink search
//!   (`Egap > 6`, ordered by thermal conductivity, 912 results, 20 per page)
//!
//! ```
//! use std::rc::Rc;
//! use aflux::{ClientConfig, Query};
//! use aflux_test::{page, FixtureTransport};
//!
//! let fixture = Rc::new(FixtureTransport::new().with_page(1, page(1..=3, 3)));
//! let mut query = Query::from_config(&ClientConfig::default(), fixture.clone());
//!
//! assert_eq!(query.len().unwrap(), 3);
//! assert_eq!(fixture.request_count(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::RangeInclusive;

use aflux::{FetchError, Page, Transport};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

static PAGING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"paging\((-?\d+),(\d+)\)").expect("valid regex"));

/// Total of the heat-sink search.
pub const PAPER_TOTAL: usize = 912;

/// Page size of the heat-sink search.
pub const PAPER_BATCH_SIZE: usize = 20;

/// Serves canned bodies without touching the network.
///
/// Resources registered with [`with_resource`](Self::with_resource) match a
/// URL exactly; pages registered with [`with_page`](Self::with_page) match
/// any URL whose `paging(n,k)` directive names that page. Anything else is a
/// 404.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    pages: HashMap<i64, String>,
    resources: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for page `page`.
    pub fn with_page(mut self, page: i64, body: Page) -> Self {
        self.pages.insert(page, Value::Object(body).to_string());
        self
    }

    /// Serves a raw text body for page `page`, e.g. a malformed response.
    pub fn with_page_text(mut self, page: i64, body: impl Into<String>) -> Self {
        self.pages.insert(page, body.into());
        self
    }

    /// Serves `body` for exactly `url`.
    pub fn with_resource(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.resources.insert(url.into(), body.into());
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Transport for FixtureTransport {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.requests.borrow_mut().push(url.to_string());

        let body = self.resources.get(url).or_else(|| {
            paging(url)
                .map(|(page, _)| page)
                .and_then(|page| self.pages.get(&page))
        });

        body.cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
            body: String::new(),
        })
    }
}

/// The `(n, k)` of the `paging(n,k)` directive in `url`.
pub fn paging(url: &str) -> Option<(i64, usize)> {
    let caps = PAGING.captures(url)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// A synthetic material ranked `ordinal` (1-based) in its result set.
///
/// Thermal conductivity decreases with rank, matching a descending search.
pub fn material(ordinal: usize) -> Value {
    json!({
        "auid": format!("aflow:{ordinal:016x}"),
        "aurl": format!("aflowlib.duke.edu:AFLOWDATA/ICSD_WEB/TEST/X{ordinal}_ICSD_{ordinal}"),
        "compound": format!("X{ordinal}"),
        "Egap": format!("{:.4}", 6.0 + 1.0 / (ordinal as f64 + 1.0)),
        "agl_thermal_conductivity_300K": format!("{:.3}", 1000.0 / ordinal as f64),
    })
}

/// A page holding the records ranked `ordinals` out of `total`.
pub fn page(ordinals: RangeInclusive<usize>, total: usize) -> Page {
    ordinals
        .map(|i| (format!("{i} of {total}"), material(i)))
        .collect()
}

/// The first two descending pages of the heat-sink search.
pub fn paper_fixture() -> FixtureTransport {
    FixtureTransport::new()
        .with_page(-1, page(1..=20, PAPER_TOTAL))
        .with_page(-2, page(21..=40, PAPER_TOTAL))
}
