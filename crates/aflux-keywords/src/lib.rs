//! AFLUX keywords - Expression engine for the AFLOW search API.
//!
//! This crate turns comparisons on AFLOW keywords into the AFLUX wire
//! grammar. It supports:
//!
//! - A static catalog of every keyword with its wire type and units
//! - Comparison operators: `eq`, `ne`, `lt`, `gt`, `le`, `ge`, `contains`
//! - Logical combination with AND (`,`) and OR (`:`), on one keyword or many
//! - Negation that round-trips
//!
//! # Quick Start
//!
//! ```rust
//! use aflux_keywords::catalog::{EGAP, PV_CELL, SPECIES};
//!
//! // Two predicates on the same keyword fold into one term
//! let gap = EGAP.gt(6).or(EGAP.lt(21)).unwrap();
//! assert_eq!(gap.to_string(), "Egap(!*6:!21*)");
//!
//! // Different keywords are joined term by term
//! let query = gap.and(PV_CELL.le(13)).unwrap();
//! assert_eq!(query.to_string(), "Egap(!*6:!21*),PV_cell(*13)");
//!
//! // Negation toggles the marker and undoes itself
//! let not_si = SPECIES.contains("Si").negate().unwrap();
//! assert_eq!(not_si.to_string(), "species(!*'Si'*)");
//! assert_eq!(not_si.negate().unwrap().to_string(), "species(*'Si'*)");
//! ```
//!
//! # Wire Grammar
//!
//! ```text
//! predicate  := keyword '(' fragment ')'
//! fragment   := comparison | fragment ',' fragment | fragment ':' fragment
//!             | '(' fragment ')'
//! comparison := '*'v | v'*' | v | '!'v | '*'quoted'*' | '!'comparison
//! ```
//!
//! | Method | Fragment | Meaning |
//! |--------|----------|---------|
//! | `lt(v)` | `!v*` | below v |
//! | `gt(v)` | `!*v` | above v |
//! | `le(v)` | `*v` | up to v |
//! | `ge(v)` | `v*` | from v |
//! | `eq(v)` | `v` | exactly v |
//! | `ne(v)` | `!v` | anything but v |
//! | `contains(s)` | `*'s'*` | substring |
//!
//! Keywords hold no state: every comparison returns a fresh [`Expression`],
//! so independent queries can be built side by side.

pub mod catalog;
mod error;
mod expression;
mod field;
mod op;
mod operand;
mod ordering;

// Re-export public API
pub use error::{ExprError, Result};
pub use expression::{Conjunction, Expression};
pub use field::{Field, Status, ValueType, WireType};
pub use op::Op;
pub use operand::{Number, Operand};
pub use ordering::{Dir, OrderBy};
