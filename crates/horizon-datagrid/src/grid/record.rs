//! Records flowing through the grid.
//!
//! A [`Record`] is an opaque JSON object with a required `id` field. The grid
//! never assumes any other shape: columns reach into records either directly
//! by key ([`Record::field`]) or through an accessor path
//! ([`Record::resolve`]).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GridError, Result};

/// Name of the identifier field every record must carry.
pub const ID_FIELD: &str = "id";

/// Unique identifier of a record.
///
/// Identifiers are either integers or strings, matching what REST payloads
/// carry. `Int(1)` and `Str("1")` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer identifier.
    Int(i64),
    /// String identifier.
    Str(String),
}

impl RecordId {
    /// Extracts an identifier from a JSON value.
    ///
    /// Only integers and strings qualify; floats, booleans and containers do not.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::Str(s.clone())),
            _ => None,
        }
    }

    /// Returns this identifier as a JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Int(n) => Value::from(*n),
            RecordId::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Int(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Str(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Str(value)
    }
}

/// A single data item: a JSON object with a unique `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a record from a JSON object.
    ///
    /// Fails if the object has no `id` field or the id is not an integer or
    /// string.
    pub fn new(fields: Map<String, Value>) -> Result<Self> {
        Self::at_index(fields, 0)
    }

    /// Creates a record from any JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_at(value, 0)
    }

    /// Like [`Record::from_value`], reporting `index` in errors.
    pub(crate) fn from_value_at(value: Value, index: usize) -> Result<Self> {
        match value {
            Value::Object(fields) => Self::at_index(fields, index),
            other => Err(GridError::invalid_record(
                index,
                format!("expected a JSON object, found {}", type_name(&other)),
            )),
        }
    }

    fn at_index(fields: Map<String, Value>, index: usize) -> Result<Self> {
        let id = match fields.get(ID_FIELD) {
            Some(value) => RecordId::from_value(value).ok_or_else(|| {
                GridError::invalid_record(
                    index,
                    format!("`id` must be an integer or string, found {}", type_name(value)),
                )
            })?,
            None => return Err(GridError::invalid_record(index, "missing `id` field")),
        };
        Ok(Self { id, fields })
    }

    /// Returns the record's identifier.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Looks up a top-level field by key, without path interpretation.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Resolves an accessor path.
    ///
    /// The path uses dot notation for object keys and bracket notation for
    /// array indices, e.g. `"customer.name"` or `"items[0].sku"`. A path
    /// without separators is a plain key lookup. Returns `None` if any segment
    /// is missing.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let mut parts = parse_path(path).into_iter();
        let mut current = match parts.next()? {
            PathPart::Key(key) => self.fields.get(key)?,
            PathPart::Index(_) => return None,
        };

        for part in parts {
            current = match part {
                PathPart::Key(key) => current.get(key)?,
                PathPart::Index(idx) => current.get(idx)?,
            };
        }
        Some(current)
    }

    /// Returns all fields of the record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Converts the record back into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = GridError;

    fn try_from(value: Value) -> Result<Self> {
        Record::from_value(value)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Record::new(fields).map_err(serde::de::Error::custom)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a non-integer number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A segment of an accessor path.
#[derive(Debug, PartialEq)]
enum PathPart<'a> {
    Key(&'a str),
    Index(usize),
}

fn parse_path(path: &str) -> Vec<PathPart<'_>> {
    let mut parts = Vec::new();
    let mut key_start = 0;
    let mut chars = path.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '.' => {
                if i > key_start {
                    parts.push(PathPart::Key(&path[key_start..i]));
                }
                key_start = i + 1;
            }
            '[' => {
                if i > key_start {
                    parts.push(PathPart::Key(&path[key_start..i]));
                }

                let idx_start = i + 1;
                let mut idx_end = path.len();
                while let Some(&(j, ch)) = chars.peek() {
                    chars.next();
                    if ch == ']' {
                        idx_end = j;
                        break;
                    }
                }

                if let Ok(idx) = path[idx_start..idx_end].parse::<usize>() {
                    parts.push(PathPart::Index(idx));
                }
                key_start = (idx_end + 1).min(path.len());
            }
            _ => {}
        }
    }

    if key_start < path.len() {
        parts.push(PathPart::Key(&path[key_start..]));
    }
    parts
}
