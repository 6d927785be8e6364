//! Shared fixtures: a corpus of 30 programming books.

#![allow(dead_code)]

use std::sync::Arc;

use microsearch::prelude::*;
use serde::{Deserialize, Serialize};

pub const DESIGN_PATTERNS_ID: &str = "c3a4b5c6-3333-4444-5555-666677778888";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammingBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published: String,
    #[serde(rename = "publishedYear")]
    pub published_year: i64,
    pub tags: Vec<String>,
}

const BOOKS: &[(&str, &str, &str, &[&str])] = &[
    (
        "Clean Code: A Handbook of Agile Software Craftsmanship",
        "Robert C. Martin",
        "2008-08-01",
        &["clean code", "craftsmanship", "agile"],
    ),
    (
        "The Pragmatic Programmer",
        "Andrew Hunt, David Thomas",
        "1999-10-30",
        &["pragmatic", "career", "craftsmanship"],
    ),
    (
        "Design Patterns: Elements of Reusable Object-Oriented Software",
        "Erich Gamma, Richard Helm, Ralph Johnson, John Vlissides",
        "1994-10-31",
        &["design patterns", "object oriented"],
    ),
    (
        "Refactoring: Improving the Design of Existing Code",
        "Martin Fowler",
        "1999-07-08",
        &["refactoring", "design"],
    ),
    ("Effective Java", "Joshua Bloch", "2001-06-05", &["java", "best practices"]),
    ("JavaScript: The Good Parts", "Douglas Crockford", "2008-05-15", &["javascript", "web"]),
    ("Eloquent JavaScript", "Marijn Haverbeke", "2011-02-03", &["javascript", "beginner"]),
    ("Effective TypeScript", "Dan Vanderkam", "2019-11-12", &["typescript", "best practices"]),
    (
        "Continuous Delivery",
        "Jez Humble, David Farley",
        "2010-07-27",
        &["continuous delivery", "devops", "automation"],
    ),
    ("Domain-Driven Design", "Eric Evans", "2003-08-30", &["domain driven design", "architecture"]),
    (
        "Working Effectively with Legacy Code",
        "Michael Feathers",
        "2004-09-22",
        &["legacy code", "testing", "refactoring"],
    ),
    ("Test Driven Development: By Example", "Kent Beck", "2002-11-08", &["tdd", "testing"]),
    ("Code Complete", "Steve McConnell", "2004-06-09", &["construction", "craftsmanship"]),
    (
        "The Mythical Man-Month",
        "Frederick P. Brooks Jr.",
        "1975-01-01",
        &["project management", "classic"],
    ),
    (
        "Structure and Interpretation of Computer Programs",
        "Harold Abelson, Gerald Jay Sussman",
        "1996-07-25",
        &["lisp", "fundamentals"],
    ),
    (
        "Introduction to Algorithms",
        "Thomas H. Cormen, Charles E. Leiserson, Ronald L. Rivest, Clifford Stein",
        "2009-07-31",
        &["algorithms", "data structures"],
    ),
    (
        "Designing Data-Intensive Applications",
        "Martin Kleppmann",
        "2017-03-16",
        &["distributed systems", "databases"],
    ),
    (
        "Site Reliability Engineering",
        "Betsy Beyer, Chris Jones, Jennifer Petoff, Niall Richard Murphy",
        "2016-04-16",
        &["sre", "operations", "devops"],
    ),
    (
        "The Phoenix Project",
        "Gene Kim, Kevin Behr, George Spafford",
        "2013-01-10",
        &["devops", "novel"],
    ),
    ("Accelerate", "Nicole Forsgren, Jez Humble, Gene Kim", "2018-03-27", &["devops", "metrics"]),
    (
        "The Rust Programming Language",
        "Steve Klabnik, Carol Nichols",
        "2018-08-12",
        &["rust", "systems"],
    ),
    ("Programming Rust", "Jim Blandy, Jason Orendorff", "2017-12-21", &["rust", "systems"]),
    (
        "Head First Design Patterns",
        "Eric Freeman, Elisabeth Robson",
        "2004-10-25",
        &["design patterns", "java"],
    ),
    (
        "Patterns of Enterprise Application Architecture",
        "Martin Fowler",
        "2002-11-15",
        &["architecture", "enterprise"],
    ),
    ("Release It!", "Michael T. Nygard", "2007-03-30", &["operations", "resilience"]),
    (
        "Growing Object-Oriented Software, Guided by Tests",
        "Steve Freeman, Nat Pryce",
        "2009-10-12",
        &["tdd", "object oriented", "testing"],
    ),
    ("Building Microservices", "Sam Newman", "2015-02-20", &["microservices", "architecture"]),
    (
        "The Art of Computer Programming, Volume 1",
        "Donald E. Knuth",
        "1997-07-07",
        &["algorithms", "classic"],
    ),
    ("Peopleware", "Tom DeMarco, Timothy Lister", "1987-01-01", &["management", "teams"]),
    ("You Don't Know JS Yet", "Kyle Simpson", "2020-01-28", &["js", "language"]),
];

/// The corpus, in a fixed order.
pub fn programming_books() -> Vec<ProgrammingBook> {
    BOOKS
        .iter()
        .enumerate()
        .map(|(i, (title, author, published, tags))| {
            let id = if i == 2 {
                DESIGN_PATTERNS_ID.to_string()
            } else {
                format!("00000000-0000-4000-8000-{:012}", i + 1)
            };
            ProgrammingBook {
                id,
                title: title.to_string(),
                author: author.to_string(),
                published: published.to_string(),
                published_year: published[..4].parse().unwrap(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            }
        })
        .collect()
}

/// The corpus as documents.
pub fn book_documents() -> Vec<Document> {
    programming_books()
        .iter()
        .map(|book| Document::from_json_value(serde_json::to_value(book).unwrap()).unwrap())
        .collect()
}

/// An engine over a counting memory store with the corpus indexed and
/// `published` declared verbatim.
pub fn indexed_engine() -> (Arc<MemoryBlobStore>, MicroSearch) {
    let store = Arc::new(MemoryBlobStore::new());
    let engine = MicroSearch::new(store.clone(), IndexConfig::default()).unwrap();
    engine.put_records(&programming_books(), &["published"]).unwrap();
    (store, engine)
}

pub fn request(json: serde_json::Value) -> QueryRequest {
    serde_json::from_value(json).unwrap()
}

pub fn titles(response: &QueryResponse<ProgrammingBook>) -> Vec<&str> {
    response.results.iter().map(|book| book.title.as_str()).collect()
}
