//! Comparison operands and their wire rendering.
//!
//! An [`Operand`] is the right-hand side of a keyword comparison. Strings are
//! quoted with `'` on the wire; numbers and booleans render in their native
//! textual form.

use std::fmt;

/// Owned value a keyword is compared against.
///
/// # Example
///
/// ```
/// use aflux_keywords::Operand;
///
/// assert_eq!(Operand::from("Si").to_string(), "'Si'");
/// assert_eq!(Operand::from(6).to_string(), "6");
/// assert_eq!(Operand::from(0.25).to_string(), "0.25");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// String value, quoted on the wire.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
}

impl Operand {
    /// Returns `true` if this is a `String` operand.
    pub fn is_string(&self) -> bool {
        matches!(self, Operand::String(_))
    }

    /// Extracts the number, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::String(s) => write!(f, "'{s}'"),
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Numeric operand or decoded numeric attribute.
///
/// Integers that arrive from AFLUX stay integral; anything with a fraction or
/// exponent is an `F64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    /// Integers above `i64::MAX`.
    U64(u64),
    F64(f64),
}

impl Number {
    /// Widens to `f64`, losing precision past 2^53.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, Number::F64(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Operand {
                fn from(n: $source) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<&String> for Operand {
    fn from(s: &String) -> Self {
        Operand::String(s.clone())
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_rendering() {
        assert_eq!(Operand::from("aflowlib").to_string(), "'aflowlib'");
        assert_eq!(Operand::from(String::from("Ag")).to_string(), "'Ag'");
        assert_eq!(Operand::from(13).to_string(), "13");
        assert_eq!(Operand::from(13u8).to_string(), "13");
        assert_eq!(Operand::from(-2i64).to_string(), "-2");
        assert_eq!(Operand::from(2.5f64).to_string(), "2.5");
        assert_eq!(Operand::from(true).to_string(), "true");
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(Operand::from(6.0f64).to_string(), "6");
    }

    #[test]
    fn operand_kinds() {
        assert!(Operand::from("x").is_string());
        assert!(!Operand::from(1).is_string());
        assert_eq!(Operand::from(1).as_number(), Some(Number::I64(1)));
        assert_eq!(Operand::from("x").as_number(), None);
    }

    #[test]
    fn primitive_widths_pick_a_variant() {
        assert_eq!(Number::from(-7i8), Number::I64(-7));
        assert_eq!(Number::from(912usize), Number::U64(912));
        assert_eq!(Number::from(0.5f32), Number::F64(0.5));
        assert!(Number::from(20u16).is_integer());
        assert!(!Number::from(6.0f64).is_integer());
    }

    #[test]
    fn widening_to_float() {
        assert_eq!(Number::I64(-3).to_f64(), -3.0);
        assert_eq!(Number::U64(u64::MAX).to_f64(), u64::MAX as f64);
        assert_eq!(Operand::from(Number::F64(1.5)).as_number().map(Number::to_f64), Some(1.5));
    }
}
