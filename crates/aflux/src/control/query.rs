//! The query controller: assembly, finalization and lazy pagination.

use std::cell::RefCell;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::rc::Rc;

use aflux_keywords::{Dir, Expression, Field, OrderBy};
use tracing::{debug, trace};

use super::cache::PageCache;
use super::cursor::{Cursor, PageSlot};
use super::matchbook::{directives, Builder, Snapshot};
use crate::config::ClientConfig;
use crate::entry::Entry;
use crate::error::{QueryError, Rejected, Result};
use crate::transport::{Page, Transport};

/// Outcome of a builder call.
pub type Built = std::result::Result<Query, Rejected>;

#[derive(Debug, Clone)]
enum State {
    Open(Builder),
    Finalized(Rc<Snapshot>),
}

/// One search against AFLUX.
///
/// A query is open while filters, selects, excludes and the ordering are
/// added. The first read (length, page fetch, iteration, indexing, slicing)
/// finalizes it: the matchbook is frozen and further mutation fails with
/// [`QueryError::Finalized`], returning the unchanged query in [`Rejected`].
///
/// A finalized query iterates over its results, fetching pages of
/// `batch_size` records on demand. Copies made by [`Query::get`] and
/// [`Query::slice`] share the page cache, so no page is fetched twice.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use aflux::catalog::{AGL_THERMAL_CONDUCTIVITY_300K as KAPPA, EGAP};
/// use aflux::{ClientConfig, Dir, Query, Transport, FetchError};
///
/// struct Offline;
/// impl Transport for Offline {
///     fn get_text(&self, _url: &str) -> Result<String, FetchError> {
///         Ok("{}".into())
///     }
/// }
///
/// let config = ClientConfig::default().with_batch_size(20);
/// let mut query = Query::from_config(&config, Rc::new(Offline))
///     .select([KAPPA]).unwrap()
///     .filter(EGAP.gt(6)).unwrap()
///     .orderby(KAPPA, Dir::Desc).unwrap();
///
/// assert_eq!(query.matchbook().unwrap(), "agl_thermal_conductivity_300K,Egap(!*6)");
/// assert_eq!(query.len().unwrap(), 0);
/// ```
pub struct Query {
    transport: Rc<dyn Transport>,
    server: Rc<str>,
    catalog: Rc<[String]>,
    batch_size: usize,
    state: State,
    cache: Rc<RefCell<PageCache>>,
    cursor: Cursor,
}

impl Query {
    /// Creates an open query with the default configuration.
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self::from_config(&ClientConfig::default(), transport)
    }

    /// Creates an open query for `config`, fetching through `transport`.
    pub fn from_config(config: &ClientConfig, transport: Rc<dyn Transport>) -> Self {
        Query {
            transport,
            server: config.server.as_str().into(),
            catalog: config.catalog.as_slice().into(),
            batch_size: config.page_size(),
            state: State::Open(Builder::default()),
            cache: Rc::new(RefCell::new(PageCache::default())),
            cursor: Cursor::default(),
        }
    }

    // ========================================================================
    // Assembly
    // ========================================================================

    /// Adds a predicate; successive filters are AND-joined.
    pub fn filter(self, expr: impl Into<Expression>) -> Built {
        let expr = expr.into();
        self.edit("filter", |builder| builder.filters.push(expr))
    }

    /// Requests keywords in the response. The order-by keyword is skipped;
    /// it is always returned.
    pub fn select(self, fields: impl IntoIterator<Item = Field>) -> Built {
        self.edit("select", |builder| {
            let order = builder.order.map(|order| order.field);
            builder
                .selects
                .extend(fields.into_iter().filter(|field| Some(*field) != order));
        })
    }

    /// Removes keywords from the response.
    pub fn exclude(self, fields: impl IntoIterator<Item = Field>) -> Built {
        self.edit("exclude", |builder| builder.excludes.extend(fields))
    }

    /// Sorts results by `field`. AFLUX supports a single sort keyword; a
    /// later call replaces an earlier one.
    pub fn orderby(self, field: Field, dir: Dir) -> Built {
        self.edit("orderby", |builder| {
            builder.order = Some(OrderBy::new(field, dir));
            builder.selects.retain(|selected| *selected != field);
        })
    }

    /// Applies `change` while open. A finalized query is handed back
    /// untouched inside the error.
    fn edit(mut self, op: &'static str, change: impl FnOnce(&mut Builder)) -> Built {
        if self.is_finalized() {
            return Err(Rejected {
                error: QueryError::Finalized { op },
                query: self,
            });
        }
        if let State::Open(builder) = &mut self.state {
            change(builder);
        }
        self.cache.borrow_mut().forget_total();
        Ok(self)
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    /// Freezes the query. Idempotent.
    pub fn finalize(&mut self) -> Result<Rc<Snapshot>> {
        let snapshot = match &self.state {
            State::Finalized(snapshot) => return Ok(Rc::clone(snapshot)),
            State::Open(builder) => Rc::new(builder.finalize()?),
        };
        debug!(matchbook = snapshot.matchbook(), "finalized query");
        self.state = State::Finalized(Rc::clone(&snapshot));
        Ok(snapshot)
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized(_))
    }

    /// The matchbook, finalizing the query.
    pub fn matchbook(&mut self) -> Result<String> {
        Ok(self.finalize()?.matchbook().to_string())
    }

    /// Sort direction; descending queries request negative pages.
    pub fn dir(&self) -> Dir {
        match &self.state {
            State::Open(builder) => builder.dir(),
            State::Finalized(snapshot) => snapshot.dir(),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn transport(&self) -> &Rc<dyn Transport> {
        &self.transport
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// Request URL for page `page`, finalizing the query.
    pub fn page_url(&mut self, page: i64) -> Result<String> {
        let snapshot = self.finalize()?;
        Ok(format!(
            "{}{},{}",
            self.server,
            snapshot.matchbook(),
            directives(&self.catalog, page, self.batch_size)
        ))
    }

    /// Fetches page `page` and stores it in the shared cache.
    ///
    /// The first stored page fixes the total result count.
    pub fn fetch_page(&mut self, page: i64) -> Result<()> {
        let url = self.page_url(page)?;
        debug!(%url, page, batch_size = self.batch_size, "requesting page");
        let body = self.transport.fetch_json(&url)?;
        self.cache.borrow_mut().store(page, body, &url)?;
        Ok(())
    }

    /// Stores an already fetched body as page `page`, as if it had been
    /// fetched. Used to replay captured responses.
    pub fn insert_page(&mut self, page: i64, body: Page) -> Result<()> {
        let url = self.page_url(page)?;
        self.cache.borrow_mut().store(page, body, &url)?;
        Ok(())
    }

    /// Number of pages held in the shared cache.
    pub fn cached_pages(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Total number of results, fetching the first page when unknown.
    pub fn len(&mut self) -> Result<usize> {
        self.finalize()?;
        let known = self.cache.borrow().total();
        if let Some(total) = known {
            return Ok(total);
        }
        self.fetch_page(self.dir().page_sign())?;
        let total = self.cache.borrow().total().unwrap_or(0);
        Ok(total)
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// Current logical position.
    pub fn position(&self) -> usize {
        self.cursor.position
    }

    /// Returns to the cursor start; cached pages are kept.
    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }

    /// The record at absolute index `index`, or `None` past the end.
    pub fn get(&mut self, index: usize) -> Result<Option<Entry>> {
        let mut copy = self.fork()?;
        copy.cursor = Cursor::at(index);
        copy.next().transpose()
    }

    /// A copy iterating over `range` of the results.
    pub fn slice(&mut self, range: impl RangeBounds<usize>) -> Result<Query> {
        self.slice_by(range, 1)
    }

    /// A copy iterating over `range` in increments of `step` (zero is
    /// treated as one).
    pub fn slice_by(&mut self, range: impl RangeBounds<usize>, step: usize) -> Result<Query> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let stop = match range.end_bound() {
            Bound::Included(&e) => Some(e.saturating_add(1)),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => None,
        };

        let mut copy = self.fork()?;
        copy.cursor = Cursor::bounded(start, stop, step);
        Ok(copy)
    }

    /// Finalizes and clones, sharing the snapshot and page cache.
    fn fork(&mut self) -> Result<Query> {
        self.finalize()?;
        Ok(Query {
            transport: Rc::clone(&self.transport),
            server: Rc::clone(&self.server),
            catalog: Rc::clone(&self.catalog),
            batch_size: self.batch_size,
            state: self.state.clone(),
            cache: Rc::clone(&self.cache),
            cursor: self.cursor,
        })
    }

    /// Materializes the record at `position`, fetching its page if needed.
    fn record_at(&mut self, position: usize) -> Result<Entry> {
        let k = self.batch_size;
        let slot = PageSlot::locate(position, k, self.dir());

        let cached = self.cache.borrow().contains(slot.page);
        if !cached {
            self.fetch_page(slot.page)?;
        }

        let cache = self.cache.borrow();
        let key = slot.key(k, cache.total().unwrap_or(0));
        trace!(%key, page = slot.page, "materializing record");

        match cache.page(slot.page).and_then(|page| page.get(&key)) {
            Some(serde_json::Value::Object(raw)) => Ok(Entry::from_map(raw.clone())),
            _ => Err(QueryError::MissingRecord {
                key,
                page: slot.page,
            }),
        }
    }
}

impl Iterator for Query {
    type Item = Result<Entry>;

    /// Materializes the record at the current position, then advances.
    ///
    /// A failed page fetch is yielded once and the cursor moves past that
    /// page; a failure to learn the total ends iteration until
    /// [`Query::rewind`].
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_exhausted(usize::MAX) {
            return None;
        }
        let total = match self.len() {
            Ok(total) => total,
            Err(err) => {
                self.cursor.halt();
                return Some(Err(err));
            }
        };
        if self.cursor.is_exhausted(total) {
            return None;
        }

        let position = self.cursor.position;
        let record = self.record_at(position);
        match &record {
            // The rest of a page that failed to arrive is skipped.
            Err(QueryError::Fetch(_)) => {
                let k = self.batch_size;
                self.cursor.skip_to((position / k + 1) * k);
            }
            _ => self.cursor.advance(),
        }
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cache.borrow().total() {
            Some(total) if self.is_finalized() => {
                let remaining = self.cursor.remaining(total);
                (remaining, Some(remaining))
            }
            _ => (0, None),
        }
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("server", &self.server)
            .field("catalog", &self.catalog)
            .field("batch_size", &self.batch_size)
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
