//! The query AST.
//!
//! A query is a tree of [`QueryToken`]s. Its JSON form uses upper-case keys:
//!
//! ```json
//! {"AND": [
//!     {"FIELD": "author", "VALUE": "David"},
//!     {"FIELD": "published", "VALUE": {"GTE": "2008-01-01", "LTE": "2008-12-31"}},
//!     {"NOT": {"INCLUDE": "rust", "EXCLUDE": {"FIELD": "tags", "VALUE": "async"}}}
//! ]}
//! ```
//!
//! A bare string is a term searched in every full-text field, and a bare
//! array is the conjunction of its elements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::field_value::FieldValue;

/// One field name or several; several fields are searched as a union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelector {
    One(String),
    Many(Vec<String>),
}

impl FieldSelector {
    /// Iterate over the selected field names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            FieldSelector::One(name) => std::slice::from_ref(name),
            FieldSelector::Many(names) => names,
        };
        names.iter().map(String::as_str)
    }
}

impl From<&str> for FieldSelector {
    fn from(name: &str) -> Self {
        FieldSelector::One(name.to_string())
    }
}

impl From<String> for FieldSelector {
    fn from(name: String) -> Self {
        FieldSelector::One(name)
    }
}

impl From<Vec<&str>> for FieldSelector {
    fn from(names: Vec<&str>) -> Self {
        FieldSelector::Many(names.into_iter().map(str::to_string).collect())
    }
}

/// A literal query operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Integer(_) | Literal::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Integer(i) => Some(*i as f64),
            Literal::Float(f) => Some(*f),
            Literal::Text(_) => None,
        }
    }

    /// The index term a number is stored under; `None` for text.
    pub fn to_index_string(&self) -> Option<String> {
        match self {
            Literal::Integer(i) => FieldValue::Integer(*i).to_index_string(),
            Literal::Float(f) => FieldValue::Float(*f).to_index_string(),
            Literal::Text(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

/// Inclusive range bounds; a missing bound is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeValue {
    #[serde(rename = "GTE", default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<Literal>,
    #[serde(rename = "LTE", default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<Literal>,
}

/// The value side of a field query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Range(RangeValue),
    Literal(Literal),
}

/// A node of the query tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawQueryToken", into = "RawQueryToken")]
pub enum QueryToken {
    /// A term searched in every full-text field.
    Term(String),
    /// Documents that have the field(s).
    Field(FieldSelector),
    /// Documents whose field(s) match a literal or fall within a range.
    FieldValue {
        field: FieldSelector,
        value: QueryValue,
    },
    /// Intersection; scores are summed.
    And(Vec<QueryToken>),
    /// Union; scores are summed.
    Or(Vec<QueryToken>),
    /// Documents matching `include` but not `exclude`.
    Not {
        include: Box<QueryToken>,
        exclude: Box<QueryToken>,
    },
}

impl QueryToken {
    pub fn term<S: Into<String>>(term: S) -> Self {
        QueryToken::Term(term.into())
    }

    pub fn field<F: Into<FieldSelector>>(field: F) -> Self {
        QueryToken::Field(field.into())
    }

    pub fn field_value<F: Into<FieldSelector>, V: Into<Literal>>(field: F, value: V) -> Self {
        QueryToken::FieldValue {
            field: field.into(),
            value: QueryValue::Literal(value.into()),
        }
    }

    pub fn range<F: Into<FieldSelector>>(
        field: F,
        gte: Option<Literal>,
        lte: Option<Literal>,
    ) -> Self {
        QueryToken::FieldValue {
            field: field.into(),
            value: QueryValue::Range(RangeValue { gte, lte }),
        }
    }

    pub fn and(clauses: Vec<QueryToken>) -> Self {
        QueryToken::And(clauses)
    }

    pub fn or(clauses: Vec<QueryToken>) -> Self {
        QueryToken::Or(clauses)
    }

    pub fn not(include: QueryToken, exclude: QueryToken) -> Self {
        QueryToken::Not {
            include: Box::new(include),
            exclude: Box::new(exclude),
        }
    }
}

// Wire shapes. Untagged variants are tried in declaration order, and the
// object shapes deny unknown keys so `{"FIELD", "VALUE"}` is never read as
// a bare field check.

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawQueryToken {
    Term(String),
    All(Vec<QueryToken>),
    And(AndToken),
    Or(OrToken),
    Not(NotToken),
    FieldValue(FieldValueToken),
    Field(FieldToken),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AndToken {
    #[serde(rename = "AND")]
    clauses: Vec<QueryToken>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrToken {
    #[serde(rename = "OR")]
    clauses: Vec<QueryToken>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotToken {
    #[serde(rename = "NOT")]
    not: NotClauses,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotClauses {
    #[serde(rename = "INCLUDE")]
    include: Box<QueryToken>,
    #[serde(rename = "EXCLUDE")]
    exclude: Box<QueryToken>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldValueToken {
    #[serde(rename = "FIELD")]
    field: FieldSelector,
    #[serde(rename = "VALUE")]
    value: QueryValue,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldToken {
    #[serde(rename = "FIELD")]
    field: FieldSelector,
}

impl From<RawQueryToken> for QueryToken {
    fn from(raw: RawQueryToken) -> Self {
        match raw {
            RawQueryToken::Term(term) => QueryToken::Term(term),
            RawQueryToken::All(clauses) => QueryToken::And(clauses),
            RawQueryToken::And(token) => QueryToken::And(token.clauses),
            RawQueryToken::Or(token) => QueryToken::Or(token.clauses),
            RawQueryToken::Not(token) => QueryToken::Not {
                include: token.not.include,
                exclude: token.not.exclude,
            },
            RawQueryToken::FieldValue(token) => QueryToken::FieldValue {
                field: token.field,
                value: token.value,
            },
            RawQueryToken::Field(token) => QueryToken::Field(token.field),
        }
    }
}

impl From<QueryToken> for RawQueryToken {
    fn from(token: QueryToken) -> Self {
        match token {
            QueryToken::Term(term) => RawQueryToken::Term(term),
            QueryToken::Field(field) => RawQueryToken::Field(FieldToken { field }),
            QueryToken::FieldValue { field, value } => {
                RawQueryToken::FieldValue(FieldValueToken { field, value })
            }
            QueryToken::And(clauses) => RawQueryToken::And(AndToken { clauses }),
            QueryToken::Or(clauses) => RawQueryToken::Or(OrToken { clauses }),
            QueryToken::Not { include, exclude } => RawQueryToken::Not(NotToken {
                not: NotClauses { include, exclude },
            }),
        }
    }
}
