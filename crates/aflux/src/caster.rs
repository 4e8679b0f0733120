//! Decoding of wire values into typed attributes.
//!
//! AFLUX returns most values as strings whose structure depends on the
//! keyword's wire type: comma-separated lists, `;`-separated matrices or the
//! composite k-point descriptor. [`decode`] turns one raw JSON value into a
//! [`Value`]; anything that does not parse decodes to [`Value::Null`].

use aflux_keywords::{catalog, Number, WireType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as Json;
use tracing::debug;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// K-point grids and the high-symmetry path of a calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpoints {
    /// Grid used for the relaxation.
    pub relaxation: Vec<Number>,
    /// Grid used for the static run.
    pub static_run: Vec<Number>,
    /// Symmetry points along the band-structure path.
    pub points: Vec<String>,
    /// Samples along the path, when reported.
    pub nsamples: Option<u32>,
}

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing or undecodable.
    Null,
    Text(String),
    TextList(Vec<String>),
    Number(Number),
    NumberList(Vec<Number>),
    /// Rows of floats, one per atom for forces and positions.
    Matrix(Vec<Vec<f64>>),
    Kpoints(Kpoints),
    /// A value of a keyword the catalog does not know, left as received.
    Raw(Json),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Raw(Json::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::to_f64)
    }

    pub fn as_texts(&self) -> Option<&[String]> {
        match self {
            Value::TextList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[Number]> {
        match self {
            Value::NumberList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&[Vec<f64>]> {
        match self {
            Value::Matrix(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_kpoints(&self) -> Option<&Kpoints> {
        match self {
            Value::Kpoints(k) => Some(k),
            _ => None,
        }
    }
}

/// Decodes the raw value of the keyword `name`.
///
/// Keywords missing from the catalog are kept as [`Value::Raw`].
pub fn decode_keyword(name: &str, raw: &Json) -> Value {
    match catalog::lookup(name) {
        Some(field) => decode(field.wire_type(), raw),
        None => Value::Raw(raw.clone()),
    }
}

/// Decodes a raw JSON value according to `wire`.
pub fn decode(wire: WireType, raw: &Json) -> Value {
    let decoded = match raw {
        Json::Null => return Value::Null,
        Json::String(s) => decode_str(wire, s),
        Json::Number(n) => json_number(n).map(|n| match wire {
            WireType::Numbers | WireType::Vector => Value::NumberList(vec![n]),
            _ => Value::Number(n),
        }),
        Json::Array(items) => decode_array(wire, items),
        Json::Bool(_) | Json::Object(_) => None,
    };

    decoded.unwrap_or_else(|| {
        debug!(wire = %wire, raw = %raw, "undecodable value");
        Value::Null
    })
}

fn decode_str(wire: WireType, s: &str) -> Option<Value> {
    let s = s.trim();
    match wire {
        WireType::String => Some(Value::Text(s.to_string())),
        WireType::Strings => Some(Value::TextList(strings(s))),
        WireType::Number => number(s).map(Value::Number),
        WireType::Numbers | WireType::Vector => numbers(s).map(Value::NumberList),
        WireType::Matrix => matrix(s).map(Value::Matrix),
        WireType::Kpoints => kpoints(s).map(Value::Kpoints),
    }
}

fn decode_array(wire: WireType, items: &[Json]) -> Option<Value> {
    match wire {
        WireType::Strings => Some(Value::TextList(
            items
                .iter()
                .map(|item| match item {
                    Json::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )),
        WireType::Numbers | WireType::Vector => items
            .iter()
            .map(json_scalar)
            .collect::<Option<Vec<_>>>()
            .map(Value::NumberList),
        WireType::Matrix => items
            .iter()
            .map(|row| {
                row.as_array()?
                    .iter()
                    .map(|x| json_scalar(x).map(Number::to_f64))
                    .collect::<Option<Vec<_>>>()
            })
            .collect::<Option<Vec<_>>>()
            .map(Value::Matrix),
        _ => None,
    }
}

fn json_number(n: &serde_json::Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        Some(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Some(Number::U64(u))
    } else {
        n.as_f64().map(Number::F64)
    }
}

fn json_scalar(item: &Json) -> Option<Number> {
    match item {
        Json::Number(n) => json_number(n),
        Json::String(s) => number(s.trim()),
        _ => None,
    }
}

fn strings(s: &str) -> Vec<String> {
    s.split(',').map(str::to_string).collect()
}

/// Integers match `^\d+$`; everything else is read as a float.
fn number(s: &str) -> Option<Number> {
    if INTEGER.is_match(s) {
        s.parse::<i64>()
            .map(Number::I64)
            .or_else(|_| s.parse::<u64>().map(Number::U64))
            .ok()
    } else {
        s.parse::<f64>().ok().map(Number::F64)
    }
}

/// A list takes the numeric kind of its first element.
fn numbers(s: &str) -> Option<Vec<Number>> {
    let items: Vec<&str> = s.split(',').map(str::trim).collect();
    let first = number(items.first()?)?;
    if first.is_integer() {
        items
            .iter()
            .map(|item| item.parse::<i64>().ok().map(Number::I64))
            .collect()
    } else {
        items
            .iter()
            .map(|item| item.parse::<f64>().ok().map(Number::F64))
            .collect()
    }
}

fn matrix(s: &str) -> Option<Vec<Vec<f64>>> {
    s.split(';')
        .map(|row| {
            row.split(',')
                .map(|x| x.trim().parse::<f64>().ok())
                .collect::<Option<Vec<_>>>()
        })
        .collect()
}

/// `relaxation;static;points` with an optional trailing `;nsamples`.
fn kpoints(s: &str) -> Option<Kpoints> {
    let parts: Vec<&str> = s.split(';').collect();
    if parts.len() < 3 {
        return None;
    }
    let grid = |part: &str| part.split(',').map(|x| number(x.trim())).collect::<Option<Vec<_>>>();

    let (points, nsamples) = if parts.len() == 3 {
        (parts[2], None)
    } else {
        let last = parts[parts.len() - 1];
        (parts[parts.len() - 2], Some(last.trim().parse::<u32>().ok()?))
    };

    Some(Kpoints {
        relaxation: grid(parts[0])?,
        static_run: grid(parts[1])?,
        points: points.split('-').map(str::to_string).collect(),
        nsamples,
    })
}
