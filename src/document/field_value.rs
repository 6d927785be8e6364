//! Field value types for documents.
//!
//! This module defines the [`FieldValue`] enum, the set of values a document
//! field can hold. Values serialize untagged, so a document is the plain JSON
//! object a caller would write by hand.
//!
//! ```
//! use microsearch::document::field_value::FieldValue;
//!
//! let text = FieldValue::from("hello");
//! assert_eq!(text.as_text(), Some("hello"));
//!
//! let year = FieldValue::Integer(1999);
//! assert_eq!(year.as_numeric(), Some(1999.0));
//! assert_eq!(year.to_index_string(), Some("1999".to_string()));
//! ```

use serde::{Deserialize, Serialize};

/// A value stored in a document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Float(f64),
    /// Free text or a verbatim string (dates, identifiers)
    Text(String),
    /// A list of strings, e.g. tags
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Numeric view of integer and float values.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }

    /// Canonical string form of a numeric value, as used for its index term.
    ///
    /// Integers print in decimal. Floats use the shortest representation that
    /// round-trips, so `2.5` becomes `"2.5"` and `2.0` becomes `"2"`.
    pub fn to_index_string(&self) -> Option<String> {
        match self {
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }

    /// Get the type name of this value (for error messages).
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[1999, 2.5, "1994-10-31", ["agile", "tdd"]]"#).unwrap();

        assert_eq!(values[0], FieldValue::Integer(1999));
        assert_eq!(values[1], FieldValue::Float(2.5));
        assert_eq!(values[2], FieldValue::from("1994-10-31"));
        assert_eq!(values[3], FieldValue::from(vec!["agile", "tdd"]));

        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1999,2.5,"1994-10-31",["agile","tdd"]]"#);
    }

    #[test]
    fn test_index_string() {
        assert_eq!(FieldValue::Integer(-3).to_index_string().as_deref(), Some("-3"));
        assert_eq!(FieldValue::Float(2.0).to_index_string().as_deref(), Some("2"));
        assert_eq!(FieldValue::Float(0.25).to_index_string().as_deref(), Some("0.25"));
        assert_eq!(FieldValue::from("x").to_index_string(), None);
    }

    #[test]
    fn test_accessors() {
        let list = FieldValue::from(vec!["a", "b"]);
        assert_eq!(list.as_list().map(|l| l.len()), Some(2));
        assert!(list.as_text().is_none());
        assert!(!list.is_numeric());
        assert_eq!(list.type_name(), "list");

        assert_eq!(FieldValue::Float(1.5).as_numeric(), Some(1.5));
        assert_eq!(FieldValue::Integer(7).as_integer(), Some(7));
        assert_eq!(FieldValue::Float(1.5).as_float(), Some(1.5));
    }
}
