//! Searchable keyword definitions.
//!
//! A [`Field`] is the immutable identity of one AFLOW keyword: the name used
//! on the wire, how its values are encoded, and descriptive metadata from the
//! schema. Fields never hold query state; comparisons on a field return a
//! fresh [`Expression`].

use std::fmt;

use crate::expression::Expression;
use crate::operand::Operand;

/// How a keyword's values are encoded in AFLUX responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// A single string.
    String,
    /// Comma-separated strings.
    Strings,
    /// A single integer or float.
    Number,
    /// Comma-separated numbers sharing the type of the first element.
    Numbers,
    /// Comma-separated floats.
    Vector,
    /// Rows separated by `;`, columns by `,`.
    Matrix,
    /// `relaxation;static;points[;nsamples]` k-point descriptor.
    Kpoints,
}

impl WireType {
    /// The semantic type values of this wire type decode to.
    pub fn value_type(self) -> ValueType {
        match self {
            WireType::String => ValueType::Text,
            WireType::Strings => ValueType::TextList,
            WireType::Number => ValueType::Number,
            WireType::Numbers => ValueType::NumberList,
            WireType::Vector => ValueType::Vector,
            WireType::Matrix => ValueType::Matrix,
            WireType::Kpoints => ValueType::Kpoints,
        }
    }

    /// Returns the AFLUX schema name of this wire type.
    pub fn as_str(self) -> &'static str {
        match self {
            WireType::String => "string",
            WireType::Strings => "strings",
            WireType::Number => "number",
            WireType::Numbers => "numbers",
            WireType::Vector => "vector",
            WireType::Matrix => "matrix",
            WireType::Kpoints => "kpoints",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic type a decoded keyword value has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Text,
    TextList,
    Number,
    NumberList,
    Vector,
    Matrix,
    Kpoints,
}

/// Availability of a keyword across database entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Present on every entry.
    Mandatory,
    /// Present when the calculation produced it.
    Optional,
    /// Present for a subset of entry kinds (e.g. project-level entries).
    Conditional,
}

/// A named, typed AFLUX search dimension.
///
/// # Example
///
/// ```
/// use aflux_keywords::catalog::{EGAP, PV_CELL};
///
/// let expr = EGAP.gt(6).and(PV_CELL.lt(13)).unwrap();
/// assert_eq!(expr.to_string(), "Egap(!*6),PV_cell(!13*)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    name: &'static str,
    wire_type: WireType,
    status: Status,
    units: &'static str,
    title: &'static str,
}

impl Field {
    /// Defines a keyword. Used by the generated catalog.
    pub const fn new(
        name: &'static str,
        wire_type: WireType,
        status: Status,
        units: &'static str,
        title: &'static str,
    ) -> Self {
        Field {
            name,
            wire_type,
            status,
            units,
            title,
        }
    }

    /// The wire identifier of this keyword.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    pub fn value_type(&self) -> ValueType {
        self.wire_type.value_type()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Physical units, empty for dimensionless keywords.
    pub fn units(&self) -> &'static str {
        self.units
    }

    /// Short human-readable description from the schema.
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Returns an empty expression on this field.
    ///
    /// Serializes as the bare field name until a comparison is applied.
    pub fn expr(self) -> Expression {
        Expression::new(self)
    }

    // ========================================================================
    // Comparison shorthands
    // ========================================================================

    /// Values strictly less than `value`.
    pub fn lt(self, value: impl Into<Operand>) -> Expression {
        self.expr().lt(value)
    }

    /// Values strictly greater than `value`.
    pub fn gt(self, value: impl Into<Operand>) -> Expression {
        self.expr().gt(value)
    }

    /// Values less than or equal to `value`.
    pub fn le(self, value: impl Into<Operand>) -> Expression {
        self.expr().le(value)
    }

    /// Values greater than or equal to `value`.
    pub fn ge(self, value: impl Into<Operand>) -> Expression {
        self.expr().ge(value)
    }

    pub fn eq(self, value: impl Into<Operand>) -> Expression {
        self.expr().eq(value)
    }

    pub fn ne(self, value: impl Into<Operand>) -> Expression {
        self.expr().ne(value)
    }

    /// String values containing `needle`.
    pub fn contains(self, needle: &str) -> Expression {
        self.expr().contains(needle)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AGL_THERMAL_CONDUCTIVITY_300K, EGAP, GEOMETRY};

    #[test]
    fn display_is_bare_name() {
        assert_eq!(EGAP.to_string(), "Egap");
        assert_eq!(
            AGL_THERMAL_CONDUCTIVITY_300K.to_string(),
            "agl_thermal_conductivity_300K"
        );
    }

    #[test]
    fn metadata() {
        assert_eq!(EGAP.units(), "eV");
        assert_eq!(EGAP.status(), Status::Mandatory);
        assert_eq!(EGAP.value_type(), ValueType::Number);
        assert_eq!(GEOMETRY.wire_type(), WireType::Numbers);
    }

    #[test]
    fn comparisons_leave_field_untouched() {
        let _ = EGAP.gt(6);
        assert!(EGAP.expr().is_empty());
        assert_eq!(EGAP.expr().to_string(), "Egap");
    }
}
