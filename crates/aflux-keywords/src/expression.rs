//! Predicate expressions over AFLOW keywords.
//!
//! An [`Expression`] accumulates comparisons against one keyword and folds
//! them together with AND (`,`) and OR (`:`). It tracks two layers:
//!
//! - **pending** fragments: operator+operand pairs such as `!*6`, not yet
//!   combined with anything;
//! - **resolved** strings: complete, parenthesis-balanced predicates.
//!
//! Combining two expressions on the same keyword folds their fragments into
//! one resolved string. Combining expressions on different keywords wraps
//! each side as `name(fragment)` and yields a new composite expression.
//!
//! ```text
//! two pending          p0 <tok> p1
//! pending + resolved   p <tok> (r)
//! two resolved         (r0) <tok> (r1)
//! ```
//!
//! Any other shape is a [`ExprError::Grammar`]: a malformed predicate sent to
//! the server silently returns wrong results, so it is never repaired.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ExprError, Result};
use crate::field::Field;
use crate::op::Op;
use crate::operand::Operand;

/// Logical connective between two predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conjunction {
    /// Logical AND, rendered `,`.
    And,
    /// Logical OR, rendered `:`.
    Or,
}

impl Conjunction {
    /// The wire token joining two predicates.
    pub fn token(self) -> char {
        match self {
            Conjunction::And => ',',
            Conjunction::Or => ':',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        }
    }
}

/// A composable AFLUX predicate built from one or more keywords.
///
/// Every builder method consumes the expression and returns the updated one;
/// clone an expression to reuse it in several predicates.
///
/// # Example
///
/// ```
/// use aflux_keywords::catalog::{EGAP, PV_CELL};
///
/// let gap = EGAP.gt(6).or(EGAP.lt(21)).unwrap();
/// assert_eq!(gap.to_string(), "Egap(!*6:!21*)");
///
/// let both = gap.and(PV_CELL.lt(13)).unwrap();
/// assert_eq!(both.to_string(), "Egap(!*6:!21*),PV_cell(!13*)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    fields: BTreeSet<&'static str>,
    pending: Vec<String>,
    resolved: Vec<String>,
}

impl Expression {
    /// Creates an empty expression on a single keyword.
    pub fn new(field: Field) -> Self {
        Expression {
            fields: BTreeSet::from([field.name()]),
            pending: Vec::new(),
            resolved: Vec::new(),
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Names of the keywords that contributed to this expression.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().copied()
    }

    /// The keyword name when exactly one keyword contributed.
    pub fn single_field(&self) -> Option<&'static str> {
        match self.fields.len() {
            1 => self.fields.first().copied(),
            _ => None,
        }
    }

    /// Partial fragments not yet combined.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Fully formed predicate strings.
    pub fn resolved(&self) -> &[String] {
        &self.resolved
    }

    /// Returns `true` if no comparison has been applied.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.resolved.is_empty()
    }

    /// Clears pending and resolved content, keeping the keyword set.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.resolved.clear();
    }

    // ========================================================================
    // Comparisons
    // ========================================================================

    /// Appends one pending fragment for `op` against `operand`.
    pub fn compare(mut self, op: Op, operand: impl Into<Operand>) -> Self {
        self.pending.push(op.fragment(&operand.into()));
        self
    }

    pub fn lt(self, value: impl Into<Operand>) -> Self {
        self.compare(Op::Lt, value)
    }

    pub fn gt(self, value: impl Into<Operand>) -> Self {
        self.compare(Op::Gt, value)
    }

    pub fn le(self, value: impl Into<Operand>) -> Self {
        self.compare(Op::Le, value)
    }

    pub fn ge(self, value: impl Into<Operand>) -> Self {
        self.compare(Op::Ge, value)
    }

    pub fn eq(self, value: impl Into<Operand>) -> Self {
        self.compare(Op::Eq, value)
    }

    pub fn ne(self, value: impl Into<Operand>) -> Self {
        self.compare(Op::Ne, value)
    }

    /// Substring match; the needle is always quoted.
    pub fn contains(self, needle: &str) -> Self {
        self.compare(Op::Contains, needle)
    }

    // ========================================================================
    // Combination
    // ========================================================================

    /// Logical AND of two predicates.
    pub fn and(self, other: Expression) -> Result<Self> {
        self.combine(other, Conjunction::And)
    }

    /// Logical OR of two predicates.
    pub fn or(self, other: Expression) -> Result<Self> {
        self.combine(other, Conjunction::Or)
    }

    /// Combines two predicates with the given connective.
    ///
    /// Expressions on the same single keyword are folded into one resolved
    /// string; anything else produces a composite of `name(fragment)` terms.
    pub fn combine(self, other: Expression, conjunction: Conjunction) -> Result<Self> {
        if self.fields.len() == 1 && self.fields == other.fields {
            self.fold(other, conjunction)
        } else {
            self.join(other, conjunction)
        }
    }

    fn fold(mut self, other: Expression, conjunction: Conjunction) -> Result<Self> {
        self.pending.extend(other.pending);
        self.resolved.extend(other.resolved);

        let token = conjunction.token();
        let folded = match (self.pending.as_slice(), self.resolved.as_slice()) {
            ([a, b], []) => format!("{a}{token}{b}"),
            ([p], [r]) => format!("{p}{token}({r})"),
            ([], [a, b]) => format!("({a}){token}({b})"),
            (pending, resolved) => {
                return Err(ExprError::Grammar {
                    context: conjunction.as_str(),
                    pending: pending.len(),
                    resolved: resolved.len(),
                })
            }
        };

        self.pending.clear();
        self.resolved = vec![folded];
        Ok(self)
    }

    fn join(self, other: Expression, conjunction: Conjunction) -> Result<Self> {
        let context = conjunction.as_str();
        let joined = format!(
            "{}{}{}",
            self.wrapped(context)?,
            conjunction.token(),
            other.wrapped(context)?
        );

        let mut fields = self.fields;
        fields.extend(other.fields);
        Ok(Expression {
            fields,
            pending: Vec::new(),
            resolved: vec![joined],
        })
    }

    /// The single fragment this expression holds.
    fn fragment(&self, context: &'static str) -> Result<&str> {
        match (self.pending.as_slice(), self.resolved.as_slice()) {
            ([], [r]) => Ok(r),
            ([p], []) => Ok(p),
            (pending, resolved) => Err(ExprError::Grammar {
                context,
                pending: pending.len(),
                resolved: resolved.len(),
            }),
        }
    }

    /// The fragment bound to its keyword; composites are already bound.
    fn wrapped(&self, context: &'static str) -> Result<String> {
        let fragment = self.fragment(context)?;
        Ok(match self.single_field() {
            Some(name) => format!("{name}({fragment})"),
            None => fragment.to_string(),
        })
    }

    // ========================================================================
    // Negation
    // ========================================================================

    /// Toggles the negation marker of this predicate.
    ///
    /// A fragment containing `!` has every `!` removed; otherwise a `!` is
    /// inserted after its first `(`, or prepended when it has none. On a
    /// multi-keyword composite the rule applies to each `name(...)` term.
    pub fn negate(mut self) -> Result<Self> {
        match (self.pending.len(), self.resolved.len()) {
            (1, 0) => {
                self.pending[0] = negate_fragment(&self.pending[0]);
            }
            (0, 1) => {
                self.resolved[0] = if self.fields.len() > 1 {
                    negate_terms(&self.resolved[0])
                } else {
                    negate_fragment(&self.resolved[0])
                };
            }
            (pending, resolved) => {
                return Err(ExprError::Grammar {
                    context: "negate",
                    pending,
                    resolved,
                })
            }
        }
        Ok(self)
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serializes to the AFLUX wire form, rejecting malformed shapes.
    ///
    /// An empty expression renders as the bare keyword name.
    pub fn render(&self) -> Result<String> {
        if self.is_empty() {
            return match self.single_field() {
                Some(name) => Ok(name.to_string()),
                None => Err(ExprError::Grammar {
                    context: "render",
                    pending: 0,
                    resolved: 0,
                }),
            };
        }
        self.wrapped("render")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match (self.pending.as_slice(), self.resolved.as_slice()) {
            (_, [r]) => r,
            ([p], []) => p,
            _ => {
                let names: Vec<&str> = self.fields().collect();
                return f.write_str(&names.join(","));
            }
        };

        match self.single_field() {
            Some(name) => write!(f, "{name}({body})"),
            None => f.write_str(body),
        }
    }
}

impl From<Field> for Expression {
    fn from(field: Field) -> Self {
        Expression::new(field)
    }
}

impl std::ops::Not for Expression {
    type Output = Result<Expression>;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

/// Byte offsets of `target` outside `'...'` operands.
fn unquoted(fragment: &str, target: char) -> impl Iterator<Item = usize> + '_ {
    let mut quoted = false;
    fragment.char_indices().filter_map(move |(i, c)| {
        if c == '\'' {
            quoted = !quoted;
        }
        (!quoted && c == target).then_some(i)
    })
}

fn negate_fragment(fragment: &str) -> String {
    let bangs: Vec<usize> = unquoted(fragment, '!').collect();
    if !bangs.is_empty() {
        return fragment
            .char_indices()
            .filter(|(i, _)| !bangs.contains(i))
            .map(|(_, c)| c)
            .collect();
    }
    match unquoted(fragment, '(').next() {
        Some(open) => {
            let mut negated = String::with_capacity(fragment.len() + 1);
            negated.push_str(&fragment[..=open]);
            negated.push('!');
            negated.push_str(&fragment[open + 1..]);
            negated
        }
        None => format!("!{fragment}"),
    }
}

/// Applies [`negate_fragment`] inside each top-level `name(...)` term.
fn negate_terms(composite: &str) -> String {
    let mut out = String::with_capacity(composite.len() + 4);
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;

    for (i, c) in composite.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => depth = depth.saturating_sub(1),
            ',' | ':' if !quoted && depth == 0 => {
                out.push_str(&negate_term(&composite[start..i]));
                out.push(c);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push_str(&negate_term(&composite[start..]));
    out
}

fn negate_term(term: &str) -> String {
    match (term.find('('), term.strip_suffix(')')) {
        (Some(open), Some(inner)) if open < inner.len() => {
            format!("{}({})", &term[..open], negate_fragment(&inner[open + 1..]))
        }
        _ => negate_fragment(term),
    }
}
