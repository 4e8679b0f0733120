//! Query assembly and lazy pagination.
//!
//! - [`Query`]: the open/finalized state machine and result iterator
//! - [`PageCache`]: pages shared between a query and its copies
//! - [`Cursor`] and [`PageSlot`]: logical positions and their page coordinates
//! - [`Snapshot`] and [`directives`]: the wire strings of a finalized query

mod cache;
mod cursor;
mod matchbook;
mod query;

pub use cache::{parse_total, PageCache};
pub use cursor::{Cursor, PageSlot};
pub use matchbook::{directives, Snapshot};
pub use query::{Built, Query};
