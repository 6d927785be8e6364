//! Query requests.

use serde::{Deserialize, Serialize};

use crate::query::token::QueryToken;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Order results by a stored field instead of by score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(rename = "FIELD")]
    pub field: String,
    #[serde(rename = "DIRECTION", default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new<S: Into<String>>(field: S, direction: SortDirection) -> Self {
        SortSpec {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending<S: Into<String>>(field: S) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending<S: Into<String>>(field: S) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Page selection. Pages are numbered from 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(rename = "NUMBER", default)]
    pub number: usize,
    /// Results per page; the index default when unset.
    #[serde(rename = "SIZE", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl PageSpec {
    pub fn new(number: usize, size: usize) -> Self {
        PageSpec {
            number,
            size: Some(size),
        }
    }
}

/// A search request: an optional query, sort and page.
///
/// Without a query every document matches, in indexing order.
///
/// ```
/// use microsearch::query::request::{QueryRequest, SortDirection};
///
/// let request: QueryRequest = serde_json::from_str(r#"{
///     "QUERY": {"FIELD": "published", "VALUE": {"GTE": "2008-01-01"}},
///     "SORT": {"FIELD": "published", "DIRECTION": "DESCENDING"},
///     "PAGE": {"NUMBER": 1, "SIZE": 10}
/// }"#).unwrap();
///
/// assert_eq!(request.sort.unwrap().direction, SortDirection::Descending);
/// assert_eq!(request.page.unwrap().size, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(rename = "QUERY", default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryToken>,
    #[serde(rename = "SORT", default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    #[serde(rename = "PAGE", default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageSpec>,
}

impl QueryRequest {
    /// A request matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn builder() -> QueryRequestBuilder {
        QueryRequestBuilder::default()
    }
}

impl From<QueryToken> for QueryRequest {
    fn from(query: QueryToken) -> Self {
        QueryRequest {
            query: Some(query),
            ..Default::default()
        }
    }
}

/// Builder for [`QueryRequest`].
#[derive(Debug, Default)]
pub struct QueryRequestBuilder {
    request: QueryRequest,
}

impl QueryRequestBuilder {
    pub fn query(mut self, query: QueryToken) -> Self {
        self.request.query = Some(query);
        self
    }

    pub fn sort<S: Into<String>>(mut self, field: S, direction: SortDirection) -> Self {
        self.request.sort = Some(SortSpec::new(field, direction));
        self
    }

    pub fn page(mut self, number: usize, size: usize) -> Self {
        self.request.page = Some(PageSpec::new(number, size));
        self
    }

    pub fn page_number(mut self, number: usize) -> Self {
        let page = self.request.page.get_or_insert_with(PageSpec::default);
        page.number = number;
        self
    }

    pub fn build(self) -> QueryRequest {
        self.request
    }
}
