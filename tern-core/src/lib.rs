//! Core RDF data model for the tern adapter.
//!
//! Values only: terms, triples, and triple patterns. Lexical encoding and
//! decoding of these types lives in `tern-ntriples`; pattern-to-filter
//! translation lives in `tern-graph`.

pub mod pattern;
pub mod term;

pub use pattern::{Triple, TriplePattern};
pub use term::{Literal, Term};
