//! Comparison operators for keyword predicates.
//!
//! The [`Op`] enum defines every comparison AFLUX can express and how each
//! renders as a partial fragment. AFLUX has no strict inequalities; `*v`
//! means "up to v" and `v*` means "from v", so `Lt` and `Gt` are the negated
//! forms of the inclusive ranges.

use crate::operand::Operand;

/// Comparison operator for a keyword predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Rendered as the bare operand.
    Eq,
    /// Rendered `!v`.
    Ne,
    /// Strictly less than, rendered `!v*`.
    Lt,
    /// Strictly greater than, rendered `!*v`.
    Gt,
    /// Less than or equal, rendered `*v`.
    Le,
    /// Greater than or equal, rendered `v*`.
    Ge,
    /// Substring match, rendered `*v*`.
    Contains,
}

impl Op {
    /// Renders the partial fragment for this operator and operand.
    ///
    /// The fragment is not yet bound to a keyword name.
    pub fn fragment(self, operand: &Operand) -> String {
        match self {
            Op::Eq => format!("{operand}"),
            Op::Ne => format!("!{operand}"),
            Op::Lt => format!("!{operand}*"),
            Op::Gt => format!("!*{operand}"),
            Op::Le => format!("*{operand}"),
            Op::Ge => format!("{operand}*"),
            Op::Contains => format!("*{operand}*"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Lt => "lt",
            Op::Gt => "gt",
            Op::Le => "le",
            Op::Ge => "ge",
            Op::Contains => "contains",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
