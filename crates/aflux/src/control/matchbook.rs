//! Query strings: the matchbook and the per-request directives.
//!
//! ```text
//! matchbook  := [orderby ','] select* ',' filter* ',' ('$'exclude)*
//! directives := ['catalog(' label [':' label]* ')' ','] 'paging(' n ',' k ')'
//! url        := server + matchbook + ',' + directives
//! ```
//!
//! AFLUX sorts on the leading keyword, so the order-by keyword always comes
//! first regardless of how the query was assembled.

use aflux_keywords::{Dir, Expression, Field, OrderBy, Result};

/// Query parts collected while the query is open.
#[derive(Debug, Clone, Default)]
pub(crate) struct Builder {
    pub filters: Vec<Expression>,
    pub selects: Vec<Field>,
    pub excludes: Vec<Field>,
    pub order: Option<OrderBy>,
}

impl Builder {
    pub fn dir(&self) -> Dir {
        self.order.map_or(Dir::Asc, |order| order.dir)
    }

    /// Serializes every part; expressions are consumed into strings.
    pub fn finalize(&self) -> Result<Snapshot> {
        let order = self.order.map(|order| order.field.expr().render()).transpose()?;
        let filters = self
            .filters
            .iter()
            .map(Expression::render)
            .collect::<Result<Vec<_>>>()?;

        Ok(Snapshot::new(
            order,
            self.dir(),
            self.selects.iter().map(|f| f.name().to_string()).collect(),
            filters,
            self.excludes.iter().map(|f| f.name().to_string()).collect(),
        ))
    }
}

/// The frozen string form of a finalized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    order: Option<String>,
    dir: Dir,
    selects: Vec<String>,
    filters: Vec<String>,
    excludes: Vec<String>,
    matchbook: String,
}

impl Snapshot {
    pub(crate) fn new(
        order: Option<String>,
        dir: Dir,
        selects: Vec<String>,
        filters: Vec<String>,
        excludes: Vec<String>,
    ) -> Self {
        let matchbook = order
            .iter()
            .cloned()
            .chain(selects.iter().cloned())
            .chain(filters.iter().cloned())
            .chain(excludes.iter().map(|name| format!("${name}")))
            .collect::<Vec<_>>()
            .join(",");

        Snapshot {
            order,
            dir,
            selects,
            filters,
            excludes,
            matchbook,
        }
    }

    pub fn matchbook(&self) -> &str {
        &self.matchbook
    }

    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn selects(&self) -> &[String] {
        &self.selects
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }
}

/// Builds the directives for page `page` of `k` records.
pub fn directives(catalog: &[String], page: i64, k: usize) -> String {
    let paging = format!("paging({page},{k})");
    if catalog.is_empty() {
        paging
    } else {
        format!("catalog({}),{paging}", catalog.join(":"))
    }
}
