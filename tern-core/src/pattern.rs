//! Triples and triple patterns.

use serde::{Deserialize, Serialize};

use crate::term::Term;

/// A fully bound RDF triple.
///
/// Positions are not kind-checked here; the lexical boundary
/// (`tern-ntriples`) rejects literals in subject position and non-IRIs in
/// predicate position before a `Triple` is ever built from external text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term (IRI or blank node).
    pub s: Term,
    /// Predicate term (IRI).
    pub p: Term,
    /// Object term (any kind).
    pub o: Term,
}

impl Triple {
    /// Create a new triple.
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o }
    }
}

/// A triple pattern: each position optionally bound, `None` meaning
/// "match any". An optional graph term scopes the pattern to one named
/// graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplePattern {
    /// Subject constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<Term>,
    /// Predicate constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<Term>,
    /// Object constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o: Option<Term>,
    /// Named-graph constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<Term>,
}

impl TriplePattern {
    /// The fully unbound pattern: matches every triple.
    pub fn any() -> Self {
        Self::default()
    }

    /// Bind the subject position.
    pub fn with_subject(mut self, s: Term) -> Self {
        self.s = Some(s);
        self
    }

    /// Bind the predicate position.
    pub fn with_predicate(mut self, p: Term) -> Self {
        self.p = Some(p);
        self
    }

    /// Bind the object position.
    pub fn with_object(mut self, o: Term) -> Self {
        self.o = Some(o);
        self
    }

    /// Scope the pattern to a named graph.
    pub fn with_graph(mut self, graph: Term) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Check if the subject is bound.
    pub fn s_bound(&self) -> bool {
        self.s.is_some()
    }

    /// Check if the predicate is bound.
    pub fn p_bound(&self) -> bool {
        self.p.is_some()
    }

    /// Check if the object is bound.
    pub fn o_bound(&self) -> bool {
        self.o.is_some()
    }

    /// Check if no position (including graph) is bound.
    pub fn is_unbound(&self) -> bool {
        self.s.is_none() && self.p.is_none() && self.o.is_none() && self.graph.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_builders_bind_positions() {
        let pattern = TriplePattern::any()
            .with_subject(Term::iri("http://ex/a"))
            .with_object(Term::blank("b1"));
        assert!(pattern.s_bound());
        assert!(!pattern.p_bound());
        assert!(pattern.o_bound());
        assert!(!pattern.is_unbound());
    }

    #[test]
    fn unbound_pattern_matches_any() {
        assert!(TriplePattern::any().is_unbound());
        assert!(!TriplePattern::any()
            .with_graph(Term::iri("http://ex/g"))
            .is_unbound());
    }
}
