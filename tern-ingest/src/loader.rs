//! Batching bulk loader.

use std::path::Path;
use std::sync::Arc;

use tern_core::{Term, Triple};
use tern_graph::document_for;
use tern_ntriples::parse_statement;
use tern_search_protocol::{index_mapping, BulkRequest, CreateIndexRequest, Document, RefreshRequest};
use tern_search_service::DocumentSink;

use crate::error::{IngestError, Result};
use crate::DEFAULT_MAX_ACTIONS;

/// Counters reported when a load finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Triples turned into documents.
    pub triples: u64,
    /// Bulk batches sent to the backend.
    pub batches: u64,
}

/// Accumulates triple documents and ships them in bulk batches.
///
/// The target index is created (with the triple field mapping) before
/// the first batch, a full batch flushes automatically, and
/// [`finish`](Self::finish) flushes the remainder and refreshes the
/// index so the loaded triples become visible to searches.
#[derive(Debug)]
pub struct BulkLoader<S: DocumentSink> {
    sink: Arc<S>,
    index: String,
    graph: Option<Term>,
    max_actions: usize,
    pending: Vec<Document>,
    stats: IngestStats,
    index_ready: bool,
}

impl<S: DocumentSink> BulkLoader<S> {
    pub fn new(sink: Arc<S>, index: impl Into<String>) -> Self {
        Self {
            sink,
            index: index.into(),
            graph: None,
            max_actions: DEFAULT_MAX_ACTIONS,
            pending: Vec::new(),
            stats: IngestStats::default(),
            index_ready: false,
        }
    }

    /// Attach a named graph to every loaded triple.
    pub fn with_graph(mut self, graph: Term) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Set the batch size. Zero is treated as one.
    pub fn with_max_actions(mut self, max_actions: usize) -> Self {
        self.max_actions = max_actions.max(1);
        self
    }

    /// Queue one triple, flushing when the batch fills up.
    pub async fn add(&mut self, triple: &Triple) -> Result<()> {
        self.ensure_index().await?;
        self.pending.push(document_for(triple, self.graph.as_ref()));
        self.stats.triples += 1;
        if self.pending.len() >= self.max_actions {
            self.flush().await?;
        }
        Ok(())
    }

    /// Load newline-separated statements. Blank lines and `#` comment
    /// lines are skipped; any other unparseable line aborts the load
    /// with its line number.
    pub async fn load_str(&mut self, input: &str) -> Result<()> {
        for (number, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let triple = parse_statement(line).map_err(|source| IngestError::Parse {
                line: number + 1,
                source,
            })?;
            self.add(&triple).await?;
        }
        Ok(())
    }

    /// Load statements from a file.
    pub async fn load_file(&mut self, path: &Path) -> Result<()> {
        let contents = tokio::fs::read_to_string(path).await?;
        self.load_str(&contents).await
    }

    /// Send any partially filled batch now.
    pub async fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let actions = std::mem::take(&mut self.pending);
        let size = actions.len();
        self.sink.bulk(BulkRequest::new(&self.index, actions)).await?;
        self.stats.batches += 1;
        tracing::debug!(batch = self.stats.batches, size, "bulk batch indexed");
        Ok(())
    }

    /// Flush the remainder, refresh the index, and report counters.
    pub async fn finish(mut self) -> Result<IngestStats> {
        self.flush().await?;
        if self.index_ready {
            self.sink.refresh(RefreshRequest::new(&self.index)).await?;
        }
        Ok(self.stats)
    }

    async fn ensure_index(&mut self) -> Result<()> {
        if self.index_ready {
            return Ok(());
        }
        let request = CreateIndexRequest::new(&self.index).with_mapping(index_mapping());
        if self.sink.create_index(request).await? {
            tracing::info!(index = %self.index, "created index");
        }
        self.index_ready = true;
        Ok(())
    }
}
