//! Graph facade.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tern_core::{Term, Triple, TriplePattern};
use tern_ntriples::encode_term;
use tern_search_protocol::{CountRequest, FilterQuery};
use tern_search_service::{ScrollConfig, SearchBackend};
use tokio::sync::broadcast;

use crate::cursor::TripleCursor;
use crate::error::Result;
use crate::translate::filter_for;

/// Sentinel returned by [`Graph::size`] when the backend cannot be asked.
pub const UNKNOWN_SIZE: i64 = -1;

/// Graph change event.
///
/// These events are **in-process only** (they are not persisted and do
/// not propagate across processes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphEvent {
    /// `clear` was requested. The index itself is untouched; removal is
    /// the responsibility of whoever owns the index.
    RemoveAll {
        /// Encoded named-graph term, `None` for the default graph.
        graph: Option<String>,
    },
}

/// Read-only RDF graph handle backed by a search index.
///
/// `find` translates a triple pattern into field-equality clauses and
/// scrolls the matches back as decoded triples. The mutation surface is
/// deliberately inert: `add` and `delete` are accepted and ignored, and
/// `clear` only notifies subscribers. Writes go through the bulk
/// loader, and read-after-write visibility follows the engine's own
/// refresh cadence.
#[derive(Debug)]
pub struct Graph<B: SearchBackend> {
    backend: Arc<B>,
    index: String,
    graph: Option<Term>,
    scroll: ScrollConfig,
    event_tx: broadcast::Sender<GraphEvent>,
}

impl<B: SearchBackend> Graph<B> {
    /// Create a handle on the default graph of an index.
    pub fn new(backend: Arc<B>, index: impl Into<String>) -> Self {
        Self::build(backend, index.into(), None, ScrollConfig::default())
    }

    pub(crate) fn build(
        backend: Arc<B>,
        index: String,
        graph: Option<Term>,
        scroll: ScrollConfig,
    ) -> Self {
        let (event_tx, _event_rx) = broadcast::channel(128);
        Self {
            backend,
            index,
            graph,
            scroll: scroll.clamped(),
            event_tx,
        }
    }

    /// Replace the scrolling configuration.
    pub fn with_scroll_config(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll.clamped();
        self
    }

    /// Index this handle reads from.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Named-graph term, `None` for the default graph.
    pub fn graph_term(&self) -> Option<&Term> {
        self.graph.as_ref()
    }

    /// Find every triple matching the pattern.
    ///
    /// On a named-graph handle the handle's own graph term scopes the
    /// search, overriding any graph the pattern carries.
    pub async fn find(&self, pattern: &TriplePattern) -> Result<TripleCursor<B>> {
        let query = self.filter(pattern)?;
        TripleCursor::open(Arc::clone(&self.backend), &self.index, query, &self.scroll).await
    }

    /// True when at least one triple matches the pattern.
    pub async fn contains(&self, pattern: &TriplePattern) -> Result<bool> {
        let query = self.filter(pattern)?;
        let count = self
            .backend
            .count(CountRequest::new(&self.index, query))
            .await?;
        Ok(count > 0)
    }

    /// Number of documents in the index.
    ///
    /// Counts match-all across the whole index, named-graph handles
    /// included. A backend failure yields [`UNKNOWN_SIZE`] instead of
    /// an error so emptiness checks degrade rather than fail.
    pub async fn size(&self) -> i64 {
        let request = CountRequest::new(&self.index, FilterQuery::match_all());
        match self.backend.count(request).await {
            Ok(count) => i64::try_from(count).unwrap_or(i64::MAX),
            Err(e) => {
                tracing::warn!(index = %self.index, error = %e, "count failed, reporting unknown size");
                UNKNOWN_SIZE
            }
        }
    }

    /// Accepted and ignored; the index is written by the bulk loader.
    pub fn add(&self, triple: &Triple) {
        tracing::debug!(
            index = %self.index,
            subject = %encode_term(&triple.s),
            "add ignored: graph handle is read-only"
        );
    }

    /// Accepted and ignored; the index is written by the bulk loader.
    pub fn delete(&self, triple: &Triple) {
        tracing::debug!(
            index = %self.index,
            subject = %encode_term(&triple.s),
            "delete ignored: graph handle is read-only"
        );
    }

    /// Emit [`GraphEvent::RemoveAll`] without touching the index.
    pub fn clear(&self) {
        tracing::debug!(index = %self.index, "clear requested: notifying subscribers only");
        let _ = self.event_tx.send(GraphEvent::RemoveAll {
            graph: self.graph.as_ref().map(encode_term),
        });
    }

    /// Subscribe to change events emitted through this handle.
    pub fn subscribe(&self) -> broadcast::Receiver<GraphEvent> {
        self.event_tx.subscribe()
    }

    fn filter(&self, pattern: &TriplePattern) -> Result<FilterQuery> {
        match &self.graph {
            Some(graph) => filter_for(&pattern.clone().with_graph(graph.clone())),
            None => filter_for(pattern),
        }
    }
}
