//! Presentable cell values and value ordering.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Number, Value};

/// A value ready for presentation in a cell.
///
/// Column render functions return this; columns without one derive it from
/// their accessor value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Nothing to show.
    #[default]
    Empty,
    /// Text content.
    Text(String),
    /// Integer content.
    Int(i64),
    /// Floating point content.
    Float(f64),
    /// Boolean content.
    Bool(bool),
}

impl CellValue {
    /// Returns `true` if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a raw JSON value into a presentable one.
    ///
    /// Nulls become `Empty`; arrays and objects are shown as their JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Empty),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// Returns the string a value is searched by, or `None` if it never matches.
pub(crate) fn search_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// A JSON number as an exact integer or a float.
#[derive(Clone, Copy)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn of(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            Numeric::Int(i.into())
        } else if let Some(u) = n.as_u64() {
            Numeric::Int(u.into())
        } else {
            Numeric::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// Compares numbers by their exact value, whatever their representation.
///
/// Integers are never rounded through `f64`, so comparisons stay transitive
/// across mixed integer and float data. NaN sorts after every number.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (Numeric::of(a), Numeric::of(b)) {
        (Numeric::Int(x), Numeric::Int(y)) => x.cmp(&y),
        (Numeric::Float(x), Numeric::Float(y)) => compare_floats(x, y),
        (Numeric::Int(x), Numeric::Float(y)) => compare_int_float(x, y),
        (Numeric::Float(x), Numeric::Int(y)) => compare_int_float(y, x).reverse(),
    }
}

fn compare_floats(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // -0.0 and 0.0 compare equal, matching the integer 0.
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

fn compare_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return Ordering::Less;
    }
    // i128::MIN is -2^127, exactly representable as f64.
    let lower = i128::MIN as f64;
    let whole = float.trunc();
    if whole < lower {
        return Ordering::Greater;
    }
    if whole >= -lower {
        return Ordering::Less;
    }

    // `whole` is integral and within range, so the cast is exact.
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => {
            let fraction = float - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        unequal => unequal,
    }
}

/// Natural ordering over raw field values.
///
/// Numbers compare by exact value and strings lexicographically. Values of
/// different kinds are ordered missing/null < bool < number < string <
/// array < object, which makes this a total order.
pub(crate) fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => compare_numbers(x, y),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ Value::Array(_)), Some(y @ Value::Array(_)))
        | (Some(x @ Value::Object(_)), Some(y @ Value::Object(_))) => {
            x.to_string().cmp(&y.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
