//! Fetched pages of one finalized query.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::FetchError;
use crate::transport::Page;

static RECORD_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s+of\s+(\d+)\s*$").expect("valid regex"));

/// Pages keyed by their signed page number, plus the discovered total.
///
/// Shared between a query and every copy made by indexing or slicing. Pages
/// are never evicted.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: HashMap<i64, Page>,
    total: Option<usize>,
}

impl PageCache {
    /// Total number of results, once a page has been stored.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Drops the known total; stored pages stay.
    pub fn forget_total(&mut self) {
        self.total = None;
    }

    pub fn contains(&self, page: i64) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn page(&self, page: i64) -> Option<&Page> {
        self.pages.get(&page)
    }

    /// Number of stored pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Stores `body` under `page`, reading the total from it when unknown.
    ///
    /// `url` identifies the response in errors.
    pub fn store(&mut self, page: i64, body: Page, url: &str) -> Result<(), FetchError> {
        if self.total.is_none() {
            let total = parse_total(&body, url)?;
            debug!(total, page, "discovered result count");
            self.total = Some(total);
        }
        self.pages.insert(page, body);
        Ok(())
    }
}

/// Reads `N` from the first `"<i> of <N>"` key; an empty page means no results.
pub fn parse_total(body: &Page, url: &str) -> Result<usize, FetchError> {
    let Some(first) = body.keys().next() else {
        return Ok(0);
    };

    body.keys()
        .find_map(|key| RECORD_KEY.captures(key))
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| FetchError::MalformedCount {
            url: url.to_string(),
            key: first.clone(),
        })
}
