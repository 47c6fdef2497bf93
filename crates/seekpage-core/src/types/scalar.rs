//! Scalar values carried by cursors and predicates.

use std::cmp::Ordering;
use std::fmt;

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single column value as seen by the pagination engine.
///
/// Cursor positions and seek predicates only ever need JSON scalars, so rows
/// expose their `id` and pivot columns through this type rather than through
/// a store-specific value representation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(untagged)]
pub enum Scalar {
    /// Missing or SQL `NULL` value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Unsigned integer value above `i64::MAX`.
    UInt(u64),
    /// Floating point value.
    ///
    /// Non-finite values encode as `null`.
    Float(f64),
    /// Text value, including formatted timestamps and UUIDs.
    Text(String),
}

impl Scalar {
    /// Returns whether the value is [`Scalar::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text content, if this is a text value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer content, if this is an integer value.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns whether the value has a place in a total order.
    ///
    /// `Null` and non-finite floats do not: comparisons against them never
    /// hold, and non-finite floats encode as `null` in a cursor.
    pub fn is_orderable(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Float(x) => x.is_finite(),
            _ => true,
        }
    }

    /// Converts a JSON value into a scalar.
    ///
    /// Arrays and objects have no place in a cursor and read as `Null`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null | Value::Array(_) | Value::Object(_) => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    n.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            Value::String(s) => Self::Text(s.clone()),
        }
    }

    /// Formats a timestamp with fixed microsecond precision.
    ///
    /// A fixed width keeps the text representation ordered the same way as
    /// the instants it encodes.
    pub fn timestamp(timestamp: Timestamp) -> Self {
        Self::Text(format!("{timestamp:.6}"))
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Int(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::UInt(a), Self::UInt(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::UInt(b)) => i128::from(*a).partial_cmp(&i128::from(*b)),
            (Self::UInt(a), Self::Int(b)) => i128::from(*a).partial_cmp(&i128::from(*b)),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::UInt(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::UInt(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<Scalar> for serde_json::Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Self::Null,
            Scalar::Bool(b) => Self::Bool(b),
            Scalar::Int(i) => Self::from(i),
            Scalar::UInt(u) => Self::from(u),
            Scalar::Float(x) => Self::from(x),
            Scalar::Text(s) => Self::String(s),
        }
    }
}

impl From<&serde_json::Value> for Scalar {
    fn from(value: &serde_json::Value) -> Self {
        Self::from_json(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Uuid> for Scalar {
    fn from(value: Uuid) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Timestamp> for Scalar {
    fn from(value: Timestamp) -> Self {
        Self::timestamp(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalar_from_json() {
        assert_eq!(Scalar::from_json(&json!(7)), Scalar::Int(7));
        assert_eq!(Scalar::from_json(&json!(1.5)), Scalar::Float(1.5));
        assert_eq!(Scalar::from_json(&json!("t1")), Scalar::Text("t1".into()));
        assert_eq!(Scalar::from_json(&json!(true)), Scalar::Bool(true));
        assert_eq!(Scalar::from_json(&json!([1, 2])), Scalar::Null);
        assert_eq!(Scalar::from_json(&json!({"a": 1})), Scalar::Null);
    }

    #[test]
    fn scalar_untagged_deserialization() {
        let values: Vec<Scalar> = serde_json::from_str(r#"[null, true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Scalar::Null,
                Scalar::Bool(true),
                Scalar::Int(3),
                Scalar::Float(2.5),
                Scalar::Text("x".into()),
            ]
        );
    }

    #[test]
    fn scalar_ordering() {
        assert!(Scalar::Int(1) < Scalar::Int(2));
        assert!(Scalar::Int(2) < Scalar::Float(2.5));
        assert!(Scalar::from("t1") < Scalar::from("t2"));
        assert_eq!(Scalar::Int(1).partial_cmp(&Scalar::from("1")), None);
    }

    #[test]
    fn timestamp_text_is_fixed_width() {
        let whole: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        let fraction: Timestamp = "2024-01-01T00:00:00.5Z".parse().unwrap();

        let whole = Scalar::from(whole);
        let fraction = Scalar::from(fraction);

        assert_eq!(whole.as_str().map(str::len), fraction.as_str().map(str::len));
        assert!(whole < fraction);
    }

    #[test]
    fn scalar_keeps_large_unsigned_ids() {
        let value = Scalar::from_json(&json!(u64::MAX));
        assert!(matches!(value, Scalar::UInt(u64::MAX)));
        assert_eq!(serde_json::Value::from(value.clone()), json!(u64::MAX));

        let decoded: Scalar = serde_json::from_value(json!(u64::MAX)).unwrap();
        assert!(matches!(decoded, Scalar::UInt(u64::MAX)));

        assert!(Scalar::Int(i64::MAX) < Scalar::UInt(u64::MAX));
        assert!(Scalar::Int(-1) < Scalar::UInt(u64::MAX));
        assert!(matches!(Scalar::from(7_u64), Scalar::Int(7)));
    }

    #[test]
    fn scalar_equality_agrees_with_ordering() {
        let pairs = [
            (Scalar::Int(2), Scalar::Float(2.0)),
            (Scalar::Int(2), Scalar::Float(2.5)),
            (Scalar::Int(1), Scalar::from("1")),
            (Scalar::Null, Scalar::Null),
            (Scalar::Float(f64::NAN), Scalar::Float(f64::NAN)),
        ];

        for (a, b) in pairs {
            assert_eq!(a == b, a.partial_cmp(&b) == Some(Ordering::Equal), "{a} vs {b}");
        }
        assert_eq!(Scalar::Int(2), Scalar::Float(2.0));
    }

    #[test]
    fn scalar_orderable() {
        assert!(Scalar::Int(1).is_orderable());
        assert!(Scalar::from("t1").is_orderable());
        assert!(Scalar::Float(1.5).is_orderable());
        assert!(!Scalar::Null.is_orderable());
        assert!(!Scalar::Float(f64::INFINITY).is_orderable());
        assert!(!Scalar::Float(f64::NAN).is_orderable());
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::from("t2").to_string(), "\"t2\"");
        assert_eq!(Scalar::Int(2).to_string(), "2");
        assert_eq!(Scalar::Null.to_string(), "null");
    }
}
