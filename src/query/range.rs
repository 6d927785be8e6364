//! Range matching over posting keys.

use std::ops::Bound;

use crate::error::{MicroSearchError, Result};
use crate::index::posting::{FieldPostings, PostingList};
use crate::query::token::{Literal, RangeValue};

/// A range whose comparison regime is fixed by its operand types.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedRange<'a> {
    /// Keys are compared as numbers; keys that do not parse never match.
    Numeric {
        lower: Option<f64>,
        upper: Option<f64>,
    },
    /// Keys are compared lexicographically.
    Text {
        lower: Option<&'a str>,
        upper: Option<&'a str>,
    },
}

impl<'a> TypedRange<'a> {
    /// Decide the comparison regime from the bounds.
    ///
    /// Numeric bounds select numeric comparison and string bounds select
    /// lexicographic comparison. Mixing the two is a query error. A range
    /// without bounds matches every key lexicographically.
    pub fn from_bounds(range: &'a RangeValue) -> Result<Self> {
        let gte = range.gte.as_ref();
        let lte = range.lte.as_ref();

        let numeric = gte.is_some_and(Literal::is_numeric) || lte.is_some_and(Literal::is_numeric);
        let textual = gte.is_some_and(|b| !b.is_numeric()) || lte.is_some_and(|b| !b.is_numeric());

        match (numeric, textual) {
            (true, true) => Err(MicroSearchError::query(format!(
                "range bounds must both be numbers or both be strings, got {} and {}",
                describe(gte),
                describe(lte)
            ))),
            (true, false) => {
                let lower = gte.and_then(Literal::as_f64);
                let upper = lte.and_then(Literal::as_f64);
                if lower.is_some_and(f64::is_nan) || upper.is_some_and(f64::is_nan) {
                    return Err(MicroSearchError::query("range bound is not a number"));
                }
                Ok(TypedRange::Numeric { lower, upper })
            }
            _ => Ok(TypedRange::Text {
                lower: gte.and_then(text_bound),
                upper: lte.and_then(text_bound),
            }),
        }
    }

    /// Iterate over the terms of a field that fall within the range.
    pub fn matching_terms<'p>(
        &self,
        postings: &'p FieldPostings,
    ) -> Box<dyn Iterator<Item = (&'p str, &'p PostingList)> + 'p>
    where
        'a: 'p,
    {
        match *self {
            TypedRange::Text { lower, upper } => Box::new(postings.range(
                lower.map_or(Bound::Unbounded, Bound::Included),
                upper.map_or(Bound::Unbounded, Bound::Included),
            )),
            TypedRange::Numeric { lower, upper } => {
                Box::new(postings.iter().filter(move |(term, _)| {
                    match term.parse::<f64>() {
                        Ok(value) if !value.is_nan() => {
                            lower.is_none_or(|l| value >= l) && upper.is_none_or(|u| value <= u)
                        }
                        _ => false,
                    }
                }))
            }
        }
    }
}

fn text_bound(literal: &Literal) -> Option<&str> {
    match literal {
        Literal::Text(s) => Some(s.as_str()),
        _ => None,
    }
}

fn describe(bound: Option<&Literal>) -> String {
    match bound {
        Some(Literal::Text(s)) => format!("\"{s}\""),
        Some(other) => other.to_string(),
        None => "nothing".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postings(terms: &[&str]) -> FieldPostings {
        let mut postings = FieldPostings::new();
        for (doc, term) in terms.iter().enumerate() {
            postings.add(term, doc as u64, 1.0);
        }
        postings
    }

    fn matched(range: &RangeValue, postings: &FieldPostings) -> Vec<String> {
        TypedRange::from_bounds(range)
            .unwrap()
            .matching_terms(postings)
            .map(|(term, _)| term.to_string())
            .collect()
    }

    #[test]
    fn test_numeric_range_is_not_lexicographic() {
        let years = postings(&["9", "10", "1999", "2001", "2020", "n/a"]);
        let range = RangeValue {
            gte: Some(Literal::Integer(5)),
            lte: Some(Literal::Integer(2001)),
        };
        assert_eq!(matched(&range, &years), vec!["10", "1999", "2001", "9"]);

        let range = RangeValue {
            gte: Some(Literal::Float(2000.5)),
            lte: None,
        };
        assert_eq!(matched(&range, &years), vec!["2001", "2020"]);
    }

    #[test]
    fn test_text_range() {
        let dates = postings(&["1994-10-31", "2008-05-15", "2008-08-01", "2011-05-13"]);
        let range = RangeValue {
            gte: Some(Literal::from("2008-01-01")),
            lte: Some(Literal::from("2008-12-31")),
        };
        assert_eq!(matched(&range, &dates), vec!["2008-05-15", "2008-08-01"]);

        assert_eq!(matched(&RangeValue::default(), &dates).len(), 4);
    }

    #[test]
    fn test_mixed_bounds_are_rejected() {
        let range = RangeValue {
            gte: Some(Literal::Integer(1999)),
            lte: Some(Literal::from("2001")),
        };
        let err = TypedRange::from_bounds(&range).unwrap_err();
        assert!(matches!(err, MicroSearchError::Query(_)));
    }
}
