//! N-Triples lexical codec.
//!
//! Moves RDF terms between their in-memory form ([`tern_core::Term`]) and
//! the canonical N-Triples textual form used by the document index:
//! `<uri>`, `_:label`, `"value"`, `"value"@lang`, `"value"^^<datatype>`.
//!
//! Both directions are used by the adapter: encoding on the write path
//! (building indexed documents and filter values) and decoding on the read
//! path (reconstructing triples from search hits). The statement module
//! adds line-level parsing for N-Triples uploads.

pub mod codec;
pub mod error;
pub mod statement;

pub use codec::{
    decode_predicate, decode_subject, decode_term, encode_term, escape, unescape,
};
pub use error::{NtriplesError, Result};
pub use statement::parse_statement;
