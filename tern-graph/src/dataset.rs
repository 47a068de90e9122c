//! Dataset facade: graph handles over one index.

use std::sync::Arc;

use tern_core::Term;
use tern_search_service::{ScrollConfig, SearchBackend};

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Factory for default and named graph handles over a single index.
#[derive(Debug)]
pub struct Dataset<B: SearchBackend> {
    backend: Arc<B>,
    index: String,
    scroll: ScrollConfig,
}

impl<B: SearchBackend> Dataset<B> {
    pub fn new(backend: Arc<B>, index: impl Into<String>) -> Self {
        Self {
            backend,
            index: index.into(),
            scroll: ScrollConfig::default(),
        }
    }

    /// Scrolling configuration applied to every handle created here.
    pub fn with_scroll_config(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    /// Index the handles read from.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Handle on the default graph (no `c` scoping).
    pub fn default_graph(&self) -> Graph<B> {
        Graph::build(
            Arc::clone(&self.backend),
            self.index.clone(),
            None,
            self.scroll.clone(),
        )
    }

    /// Handle scoped to the named graph with the given IRI.
    pub fn named_graph(&self, iri: impl Into<String>) -> Result<Graph<B>> {
        let iri = iri.into();
        if iri.trim().is_empty() {
            return Err(GraphError::InvalidGraph {
                message: "named graph IRI must not be empty".to_string(),
            });
        }
        Ok(Graph::build(
            Arc::clone(&self.backend),
            self.index.clone(),
            Some(Term::iri(iri)),
            self.scroll.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_search_service::MemoryBackend;

    #[test]
    fn test_default_and_named_handles() {
        let dataset = Dataset::new(Arc::new(MemoryBackend::new()), "triples");

        let default = dataset.default_graph();
        assert!(default.graph_term().is_none());
        assert_eq!(default.index(), "triples");

        let named = dataset.named_graph("http://example.org/g").unwrap();
        assert_eq!(
            named.graph_term(),
            Some(&Term::iri("http://example.org/g"))
        );
    }

    #[test]
    fn test_empty_graph_iri_rejected() {
        let dataset = Dataset::new(Arc::new(MemoryBackend::new()), "triples");
        assert!(matches!(
            dataset.named_graph("  "),
            Err(GraphError::InvalidGraph { .. })
        ));
    }
}
