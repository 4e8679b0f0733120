//! Result ordering for AFLUX queries.
//!
//! AFLUX sorts by the first keyword of the matchbook and supports a single
//! order-by keyword. Direction is carried by the sign of the page number in
//! the `paging(n,k)` directive.

use crate::field::Field;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Positive page numbers.
    #[default]
    Asc,
    /// Negative page numbers.
    Desc,
}

impl Dir {
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Sign applied to page numbers requested in this direction.
    pub fn page_sign(self) -> i64 {
        match self {
            Dir::Asc => 1,
            Dir::Desc => -1,
        }
    }

    /// Maps the `reverse` flag used by AFLUX clients to a direction.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Dir::Desc
        } else {
            Dir::Asc
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The order-by keyword of a query and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// The keyword to sort by.
    pub field: Field,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given keyword.
    pub fn asc(field: Field) -> Self {
        OrderBy {
            field,
            dir: Dir::Asc,
        }
    }

    /// Creates a new descending ordering for the given keyword.
    pub fn desc(field: Field) -> Self {
        OrderBy {
            field,
            dir: Dir::Desc,
        }
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: Field, dir: Dir) -> Self {
        OrderBy { field, dir }
    }
}
