//! RDF terms: IRIs, blank nodes, and literals.

use serde::{Deserialize, Serialize};

/// An RDF literal: a lexical form plus at most one of a language tag or a
/// datatype IRI.
///
/// The exclusivity of `language` and `datatype` is enforced by construction:
/// the fields are private and the three constructors ([`Literal::simple`],
/// [`Literal::lang`], [`Literal::typed`]) each set at most one of them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    datatype: Option<String>,
}

impl Literal {
    /// A plain literal with no language tag and no datatype.
    pub fn simple(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged literal, e.g. `"bar"@en`.
    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// A datatyped literal, e.g. `"42"^^<http://www.w3.org/2001/XMLSchema#integer>`.
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    /// The lexical form.
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The language tag, if this is a language-tagged literal.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The datatype IRI, if this is a datatyped literal.
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }
}

/// An RDF term: IRI, blank node, or literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// An IRI reference, stored without the `<` `>` delimiters.
    Iri(String),
    /// A blank node, identified by its local label (without the `_:` prefix).
    BlankNode(String),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Create an IRI term.
    pub fn iri(uri: impl Into<String>) -> Self {
        Term::Iri(uri.into())
    }

    /// Create a blank node term.
    pub fn blank(label: impl Into<String>) -> Self {
        Term::BlankNode(label.into())
    }

    /// Check if this term is an IRI.
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this term is a blank node.
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Check if this term is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Get the IRI if this is an Iri term.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(uri) => Some(uri),
            _ => None,
        }
    }

    /// Get the label if this is a BlankNode term.
    pub fn as_blank(&self) -> Option<&str> {
        match self {
            Term::BlankNode(label) => Some(label),
            _ => None,
        }
    }

    /// Get the literal if this is a Literal term.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}
