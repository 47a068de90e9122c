//! RDF graph facade over a document-search index.
//!
//! This crate turns a search backend holding triple documents into a
//! read-only RDF graph: triple patterns become conjunctions of
//! field-equality clauses, matches scroll back page by page, and each
//! hit is decoded from its canonical N-Triples fields into a triple.
//!
//! # Architecture
//!
//! - [`translate`]: patterns to filter queries, triples to indexed documents
//! - [`TripleCursor`]: lazy single-pass scroll over the matches
//! - [`Graph`]: the find/size/add/delete/clear capability surface
//! - [`Dataset`]: factory for default- and named-graph handles
//!
//! # Example
//!
//! ```ignore
//! use tern_graph::Dataset;
//! use tern_core::{Term, TriplePattern};
//!
//! let dataset = Dataset::new(backend, "triples");
//! let graph = dataset.default_graph();
//!
//! let pattern = TriplePattern::any().with_subject(Term::iri("http://ex/alice"));
//! let mut cursor = graph.find(&pattern).await?;
//! while let Some(triple) = cursor.next().await? {
//!     println!("{:?}", triple);
//! }
//! ```

pub mod cursor;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod translate;

pub use cursor::TripleCursor;
pub use dataset::Dataset;
pub use error::{GraphError, Result};
pub use graph::{Graph, GraphEvent, UNKNOWN_SIZE};
pub use translate::{document_for, filter_for};
