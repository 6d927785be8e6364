//! Query system for searching documents.
//!
//! A [`QueryRequest`](request::QueryRequest) carries an optional query tree,
//! a sort and a page. The tree is evaluated into scored document numbers by
//! the [`QueryEvaluator`](evaluator::QueryEvaluator), then ranked, paged and
//! materialized by the functions in [`results`].

pub mod evaluator;
pub mod range;
pub mod request;
pub mod results;
pub mod token;

pub use evaluator::{QueryEvaluator, ScoredDocs};
pub use request::{PageSpec, QueryRequest, QueryRequestBuilder, SortDirection, SortSpec};
pub use results::{Paging, QueryResponse};
pub use token::{FieldSelector, Literal, QueryToken, QueryValue, RangeValue};
