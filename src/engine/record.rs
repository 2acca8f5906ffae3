//! Decoding of loosely-structured parser records
//!
//! Parser output is JSON whose fields may be absent, scalars, nested records
//! or sequences of records. Each field is classified exactly once into a
//! [`Field`] and everything downstream matches on that variant.

use serde_json::{Map, Number, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A JSON object as produced by the parser
pub type Record = Map<String, Value>;

/// Shape of a single field of a parser record
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    /// Missing or `null`
    Absent,
    /// Boolean, number or string
    Scalar(&'a Value),
    /// Nested record
    Record(&'a Record),
    /// Sequence of arbitrary values
    Sequence(&'a [Value]),
}

impl<'a> Field<'a> {
    /// Classify a JSON value
    #[inline]
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Null => Field::Absent,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Field::Scalar(value),
            Value::Object(map) => Field::Record(map),
            Value::Array(items) => Field::Sequence(items),
        }
    }

    /// Classify the field `key` of `record`
    #[inline]
    pub fn of(record: &'a Record, key: &str) -> Self {
        record.get(key).map_or(Field::Absent, Field::classify)
    }

    /// Check if this field is a nested record
    pub fn is_record(&self) -> bool {
        matches!(self, Field::Record(_))
    }

    /// The scalar payload, if any
    pub fn scalar(&self) -> Option<Scalar> {
        match self {
            Field::Scalar(value) => Scalar::from_json(value),
            _ => None,
        }
    }

    /// The string payload, if this is a string scalar
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Field::Scalar(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A captured scalar value
///
/// Equality is exact on both type and value: `Int(1)`, `Float(1.0)`,
/// `Bool(true)` and `Str("1")` are four distinct keys.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// Boolean literal
    Bool(bool),
    /// Integral number
    Int(i64),
    /// Non-integral number, or an integer outside the `i64` range
    Float(f64),
    /// String literal
    Str(String),
}

impl Scalar {
    /// Convert a JSON scalar; `None` for null, objects and arrays
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(Self::from_number(n)),
            Value::String(s) => Some(Scalar::Str(s.clone())),
            Value::Null | Value::Object(_) | Value::Array(_) => None,
        }
    }

    fn from_number(n: &Number) -> Self {
        match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        }
    }

    /// Check if this is a number
    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Float(_))
    }

    /// The string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Bit pattern used for float equality; folds `-0.0` into `0.0`
    fn float_bits(f: f64) -> u64 {
        if f == 0.0 {
            0.0f64.to_bits()
        } else {
            f.to_bits()
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => Self::float_bits(*a) == Self::float_bits(*b),
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Bool(b) => b.hash(state),
            Scalar::Int(i) => i.hash(state),
            Scalar::Float(f) => Self::float_bits(*f).hash(state),
            Scalar::Str(s) => s.hash(state),
        }
    }
}

/// String form used for lengths and the tabular export
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

/// Reasons a record cannot become a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A required offset field is missing or null
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },
    /// An offset field is present but not a non-negative integer
    InvalidOffset {
        /// Name of the offending field
        field: &'static str,
    },
    /// `start` lies after `end`
    InvertedSpan {
        /// Start offset
        start: usize,
        /// End offset
        end: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingField { field } => write!(f, "missing required field: {}", field),
            DecodeError::InvalidOffset { field } => {
                write!(f, "field {} is not a non-negative integer", field)
            }
            DecodeError::InvertedSpan { start, end } => {
                write!(f, "start {} is after end {}", start, end)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Typed contents of one parser record
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedNode {
    /// Grammar production name; empty when the record carries no string `type`
    pub node_type: String,
    /// Identifier name
    pub name: Option<String>,
    /// Literal value (never a nested structure)
    pub value: Option<Scalar>,
    /// Literal source text
    pub raw: Option<String>,
    /// Operator token
    pub operator: Option<String>,
    /// `alternate` holds a nested record
    pub has_else_branch: bool,
    /// `finalizer` holds a nested record
    pub has_finally_clause: bool,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

fn offset(record: &Record, field: &'static str) -> Result<usize, DecodeError> {
    match Field::of(record, field) {
        Field::Absent => Err(DecodeError::MissingField { field }),
        Field::Scalar(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or(DecodeError::InvalidOffset { field }),
        _ => Err(DecodeError::InvalidOffset { field }),
    }
}

/// Decode a parser record into typed node contents
///
/// `name` and `operator` are captured only when they are strings. `value` is
/// captured when it is a scalar; `raw` when it is a scalar, in its string
/// form. Nested structures under any of these keys are treated as absent
/// here (the builder still recurses into them).
pub fn decode(record: &Record) -> Result<DecodedNode, DecodeError> {
    let start = offset(record, "start")?;
    let end = offset(record, "end")?;
    if start > end {
        return Err(DecodeError::InvertedSpan { start, end });
    }

    Ok(DecodedNode {
        node_type: Field::of(record, "type").as_str().unwrap_or_default().to_string(),
        name: Field::of(record, "name").as_str().map(str::to_string),
        value: Field::of(record, "value").scalar(),
        raw: Field::of(record, "raw").scalar().map(|s| s.to_string()),
        operator: Field::of(record, "operator").as_str().map(str::to_string),
        has_else_branch: Field::of(record, "alternate").is_record(),
        has_finally_clause: Field::of(record, "finalizer").is_record(),
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_decode_literal() {
        let rec = record(json!({
            "type": "Literal", "start": 8, "end": 9, "value": 1, "raw": "1"
        }));
        let node = decode(&rec).unwrap();
        assert_eq!(node.node_type, "Literal");
        assert_eq!(node.value, Some(Scalar::Int(1)));
        assert_eq!(node.raw.as_deref(), Some("1"));
        assert_eq!((node.start, node.end), (8, 9));
    }

    #[test]
    fn test_decode_missing_start_fails() {
        let rec = record(json!({"type": "Line", "end": 4}));
        assert_eq!(
            decode(&rec),
            Err(DecodeError::MissingField { field: "start" })
        );
    }

    #[test]
    fn test_decode_null_end_is_missing() {
        let rec = record(json!({"type": "X", "start": 0, "end": null}));
        assert_eq!(decode(&rec), Err(DecodeError::MissingField { field: "end" }));
    }

    #[test]
    fn test_decode_negative_offset_is_invalid() {
        let rec = record(json!({"start": -1, "end": 2}));
        assert_eq!(
            decode(&rec),
            Err(DecodeError::InvalidOffset { field: "start" })
        );
    }

    #[test]
    fn test_decode_inverted_span() {
        let rec = record(json!({"start": 5, "end": 2}));
        assert_eq!(
            decode(&rec),
            Err(DecodeError::InvertedSpan { start: 5, end: 2 })
        );
    }

    #[test]
    fn test_nested_value_is_absent() {
        let rec = record(json!({
            "type": "Literal", "start": 0, "end": 6,
            "value": {}, "raw": "/ab+c/", "regex": {"pattern": "ab+c", "flags": ""}
        }));
        let node = decode(&rec).unwrap();
        assert_eq!(node.value, None);
        assert_eq!(node.raw.as_deref(), Some("/ab+c/"));
    }

    #[test]
    fn test_else_and_finally_flags() {
        let rec = record(json!({
            "type": "IfStatement", "start": 0, "end": 20,
            "alternate": {"type": "BlockStatement", "start": 10, "end": 20},
            "finalizer": null
        }));
        let node = decode(&rec).unwrap();
        assert!(node.has_else_branch);
        assert!(!node.has_finally_clause);
    }

    #[test]
    fn test_scalar_alternate_is_not_else() {
        let rec = record(json!({"start": 0, "end": 1, "alternate": true}));
        assert!(!decode(&rec).unwrap().has_else_branch);
    }

    #[test]
    fn test_missing_type_decodes_empty() {
        let rec = record(json!({"start": 0, "end": 1}));
        assert_eq!(decode(&rec).unwrap().node_type, "");
    }

    #[test]
    fn test_scalar_equality_is_typed() {
        assert_ne!(Scalar::Int(1), Scalar::Float(1.0));
        assert_ne!(Scalar::Int(1), Scalar::Bool(true));
        assert_ne!(Scalar::Int(1), Scalar::Str("1".to_string()));
        assert_eq!(Scalar::Float(0.0), Scalar::Float(-0.0));
    }

    #[test]
    fn test_field_classify() {
        let seq = json!([1, {"a": 1}]);
        assert!(matches!(Field::classify(&Value::Null), Field::Absent));
        assert!(matches!(Field::classify(&json!("s")), Field::Scalar(_)));
        assert!(matches!(Field::classify(&json!({})), Field::Record(_)));
        assert!(matches!(Field::classify(&seq), Field::Sequence(items) if items.len() == 2));
    }
}
