//! Query scenarios over the programming books corpus.

mod common;

use common::{DESIGN_PATTERNS_ID, ProgrammingBook, indexed_engine, request, titles};
use microsearch::prelude::*;
use serde_json::json;

fn query(json: serde_json::Value) -> Result<QueryResponse<ProgrammingBook>> {
    let (_, engine) = indexed_engine();
    engine.query_as(&request(json))
}

#[test]
fn test_default_query_returns_first_page_in_indexing_order() -> Result<()> {
    let response = query(json!({}))?;

    assert_eq!(response.results.len(), 20);
    assert_eq!(response.paging.size, 20);
    assert_eq!(response.paging.offset, 0);
    assert_eq!(response.paging.total_pages, 2);
    assert_eq!(response.total_hits, 30);
    assert_eq!(
        response.results[0].title,
        "Clean Code: A Handbook of Agile Software Craftsmanship"
    );
    assert_eq!(response.results[2].id, DESIGN_PATTERNS_ID);
    Ok(())
}

#[test]
fn test_bare_string_searches_all_fields() -> Result<()> {
    let response = query(json!({"QUERY": "typescript"}))?;

    assert_eq!(response.results.len(), 1);
    let book = &response.results[0];
    assert_eq!(book.title, "Effective TypeScript");
    assert_eq!(book.author, "Dan Vanderkam");
    assert!(book.tags.contains(&"typescript".to_string()));
    Ok(())
}

#[test]
fn test_field_specific_search() -> Result<()> {
    let response = query(json!({"QUERY": {"FIELD": "author", "VALUE": "Robert"}}))?;

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].author, "Robert C. Martin");
    assert_eq!(
        response.results[0].title,
        "Clean Code: A Handbook of Agile Software Craftsmanship"
    );
    Ok(())
}

#[test]
fn test_and_narrows_results() -> Result<()> {
    let response = query(json!({"QUERY": {"AND": [
        {"FIELD": "author", "VALUE": "David"},
        {"FIELD": "author", "VALUE": "Farley"},
        {"FIELD": "tags", "VALUE": "continuous"}
    ]}}))?;

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].author, "Jez Humble, David Farley");
    assert_eq!(response.results[0].title, "Continuous Delivery");
    assert!(response.results[0].tags.contains(&"continuous delivery".to_string()));

    // Two clauses are enough to single it out as well.
    let response = query(json!({"QUERY": {"AND": [
        {"FIELD": "author", "VALUE": "David"},
        {"FIELD": "tags", "VALUE": "continuous"}
    ]}}))?;
    assert_eq!(titles(&response), vec!["Continuous Delivery"]);
    Ok(())
}

#[test]
fn test_or_broadens_results_without_duplicates() -> Result<()> {
    let response = query(json!({"QUERY": {"OR": [
        {"FIELD": "title", "VALUE": "TypeScript"},
        {"FIELD": "title", "VALUE": "JavaScript"}
    ]}}))?;

    assert_eq!(response.results.len(), 3);
    let titles = titles(&response);
    assert!(titles.contains(&"Effective TypeScript"));
    assert!(titles.contains(&"JavaScript: The Good Parts"));
    assert!(titles.contains(&"Eloquent JavaScript"));

    let response = query(json!({"QUERY": {"OR": [
        {"FIELD": "title", "VALUE": "JavaScript"},
        {"FIELD": "tags", "VALUE": "javascript"}
    ]}}))?;
    assert_eq!(response.results.len(), 2);
    Ok(())
}

#[test]
fn test_not_excludes() -> Result<()> {
    let response = query(json!({"QUERY": {"NOT": {
        "INCLUDE": {"FIELD": "tags", "VALUE": "devops"},
        "EXCLUDE": {"FIELD": "author", "VALUE": "Humble"}
    }}}))?;

    let mut titles = titles(&response);
    titles.sort();
    assert_eq!(titles, vec!["Site Reliability Engineering", "The Phoenix Project"]);
    Ok(())
}

#[test]
fn test_multi_word_value_matches_bigram() -> Result<()> {
    let response = query(json!({"QUERY": {"FIELD": "title", "VALUE": "design patterns"}}))?;

    let mut titles = titles(&response);
    titles.sort();
    assert_eq!(
        titles,
        vec![
            "Design Patterns: Elements of Reusable Object-Oriented Software",
            "Head First Design Patterns",
        ]
    );
    Ok(())
}

#[test]
fn test_value_longer_than_ngrams_matches_word_for_word() -> Result<()> {
    let response = query(json!({"QUERY": "Working Effectively with Legacy Code"}))?;
    assert_eq!(titles(&response), vec!["Working Effectively with Legacy Code"]);

    let response = query(json!({"QUERY": {"FIELD": "title", "VALUE": "Test Driven Development"}}))?;
    assert_eq!(titles(&response), vec!["Test Driven Development: By Example"]);

    // Every word is present, but not in this order.
    let response = query(json!({"QUERY": {"FIELD": "title", "VALUE": "development driven test"}}))?;
    assert!(response.results.is_empty());
    Ok(())
}

#[test]
fn test_date_range_on_verbatim_field() -> Result<()> {
    let response = query(json!({"QUERY": {
        "FIELD": "published",
        "VALUE": {"GTE": "1994-01-01", "LTE": "1994-12-31"}
    }}))?;

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].id, DESIGN_PATTERNS_ID);
    assert_eq!(
        response.results[0].title,
        "Design Patterns: Elements of Reusable Object-Oriented Software"
    );
    Ok(())
}

#[test]
fn test_sort_dates_ascending_and_descending() -> Result<()> {
    let range = json!({"FIELD": "published", "VALUE": {"GTE": "2008-01-01", "LTE": "2008-12-31"}});

    let response = query(json!({
        "QUERY": range,
        "SORT": {"FIELD": "published", "DIRECTION": "ASCENDING"}
    }))?;
    let dates: Vec<&str> = response.results.iter().map(|b| b.published.as_str()).collect();
    assert_eq!(dates, vec!["2008-05-15", "2008-08-01"]);

    let response = query(json!({
        "QUERY": range,
        "SORT": {"FIELD": "published", "DIRECTION": "DESCENDING"}
    }))?;
    let dates: Vec<&str> = response.results.iter().map(|b| b.published.as_str()).collect();
    assert_eq!(dates, vec!["2008-08-01", "2008-05-15"]);
    Ok(())
}

#[test]
fn test_numeric_range_and_sort() -> Result<()> {
    let response = query(json!({
        "QUERY": {"FIELD": "publishedYear", "VALUE": {"GTE": 1999, "LTE": 2001}},
        "SORT": {"FIELD": "publishedYear", "DIRECTION": "DESCENDING"}
    }))?;

    let years: Vec<i64> = response.results.iter().map(|b| b.published_year).collect();
    assert_eq!(years, vec![2001, 1999, 1999]);
    Ok(())
}

#[test]
fn test_numeric_range_is_not_lexicographic() -> Result<()> {
    // "975" would sort after "1975" as a string.
    let response = query(json!({
        "QUERY": {"FIELD": "publishedYear", "VALUE": {"LTE": 1990}},
        "SORT": {"FIELD": "publishedYear", "DIRECTION": "ASCENDING"}
    }))?;

    let years: Vec<i64> = response.results.iter().map(|b| b.published_year).collect();
    assert_eq!(years, vec![1975, 1987]);
    Ok(())
}

#[test]
fn test_mixed_range_operands_are_rejected() {
    let result = query(json!({
        "QUERY": {"FIELD": "publishedYear", "VALUE": {"GTE": 1999, "LTE": "2001"}}
    }));
    assert!(matches!(result, Err(MicroSearchError::Query(_))));
}

#[test]
fn test_pagination() -> Result<()> {
    let (_, engine) = indexed_engine();

    for (number, expected_len) in [(0, 10), (1, 10), (2, 10), (3, 0)] {
        let response = engine.query(&request(json!({"PAGE": {"NUMBER": number, "SIZE": 10}})))?;
        assert_eq!(response.results.len(), expected_len);
        assert_eq!(response.paging.size, 10);
        assert_eq!(response.paging.offset, number * 10);
        assert_eq!(response.paging.total_pages, 3);
    }

    let response = engine.query(&request(json!({"PAGE": {"NUMBER": 3, "SIZE": 7}})))?;
    assert_eq!(response.paging.total_pages, 5);
    assert_eq!(response.results.len(), 7);
    let response = engine.query(&request(json!({"PAGE": {"NUMBER": 4, "SIZE": 7}})))?;
    assert_eq!(response.results.len(), 30 % 7);

    let result = engine.query(&request(json!({"PAGE": {"NUMBER": 0, "SIZE": 0}})));
    assert!(matches!(result, Err(MicroSearchError::Query(_))));
    Ok(())
}

#[test]
fn test_pages_cover_every_document_once() -> Result<()> {
    let (_, engine) = indexed_engine();
    let mut seen = Vec::new();
    for number in 0..4 {
        let response = engine.query(&QueryRequest::builder().page(number, 8).build())?;
        seen.extend(response.results.into_iter().map(|doc| doc.id().to_string()));
    }
    let total = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(total, 30);
    assert_eq!(seen.len(), 30);
    Ok(())
}

#[test]
fn test_configured_default_page_size() -> Result<()> {
    let engine = MicroSearch::in_memory(IndexConfig::builder().default_page_size(25).build())?;
    engine.put_records(&common::programming_books(), &["published"])?;

    let response = engine.query(&QueryRequest::all())?;
    assert_eq!(response.results.len(), 25);
    assert_eq!(response.paging.total_pages, 2);
    Ok(())
}

#[test]
fn test_results_do_not_expose_internal_fields() -> Result<()> {
    let (_, engine) = indexed_engine();
    let response = engine.query(&QueryRequest::all())?;

    let json = serde_json::to_value(&response)?;
    for result in json["RESULTS"].as_array().unwrap() {
        let object = result.as_object().unwrap();
        assert!(object.contains_key("id"));
        assert!(object.keys().all(|key| !key.starts_with('_')));
    }
    Ok(())
}
