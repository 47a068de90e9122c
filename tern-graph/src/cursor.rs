//! Scrolling triple cursor.

use std::collections::VecDeque;
use std::sync::Arc;

use tern_core::Triple;
use tern_ntriples::{decode_predicate, decode_subject, decode_term};
use tern_search_protocol::{Document, FilterQuery, ScrollRequest, SearchRequest};
use tern_search_service::{ScrollConfig, SearchBackend};

use crate::error::Result;

/// Lazy single-pass cursor over every triple matching a pattern.
///
/// Opening the cursor runs the first fetch; each page after that is
/// fetched on demand when the buffered one drains, renewing the scroll
/// keep-alive. A page shorter than the page size ends the pass without
/// a further fetch. Once a fetch or decode fails, the error is returned
/// exactly once and every later call yields `Ok(None)`; the cursor is
/// not restartable and owns its scroll state exclusively.
#[derive(Debug)]
pub struct TripleCursor<B: SearchBackend> {
    backend: Arc<B>,
    buffer: VecDeque<Document>,
    scroll_id: Option<String>,
    page_size: usize,
    keep_alive_ms: u64,
    total: u64,
    exhausted: bool,
}

impl<B: SearchBackend> TripleCursor<B> {
    pub(crate) async fn open(
        backend: Arc<B>,
        index: &str,
        query: FilterQuery,
        config: &ScrollConfig,
    ) -> Result<Self> {
        let request = SearchRequest::new(index, query)
            .with_page_size(config.page_size)
            .with_keep_alive_ms(config.keep_alive_ms);
        let page = backend.search(request).await?;
        let exhausted = page.hits.len() < config.page_size || page.scroll_id.is_none();
        Ok(Self {
            backend,
            buffer: page.hits.into(),
            scroll_id: page.scroll_id,
            page_size: config.page_size,
            keep_alive_ms: config.keep_alive_ms,
            total: page.total,
            exhausted,
        })
    }

    /// Total number of matching documents reported when the pass opened.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Pull the next triple.
    ///
    /// `Ok(None)` is end of sequence. An error finishes the cursor.
    pub async fn next(&mut self) -> Result<Option<Triple>> {
        loop {
            if let Some(doc) = self.buffer.pop_front() {
                return match decode_hit(&doc) {
                    Ok(triple) => Ok(Some(triple)),
                    Err(e) => {
                        self.finish();
                        Err(e.into())
                    }
                };
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch_next_page().await?;
        }
    }

    async fn fetch_next_page(&mut self) -> Result<()> {
        let token = match self.scroll_id.take() {
            Some(token) => token,
            None => {
                self.exhausted = true;
                return Ok(());
            }
        };
        let request = ScrollRequest::new(token).with_keep_alive_ms(self.keep_alive_ms);
        let page = match self.backend.scroll(request).await {
            Ok(page) => page,
            Err(e) => {
                self.finish();
                return Err(e.into());
            }
        };
        self.exhausted = page.hits.len() < self.page_size || page.scroll_id.is_none();
        self.scroll_id = page.scroll_id;
        self.buffer = page.hits.into();
        Ok(())
    }

    fn finish(&mut self) {
        self.exhausted = true;
        self.scroll_id = None;
        self.buffer.clear();
    }
}

fn decode_hit(doc: &Document) -> tern_ntriples::Result<Triple> {
    Ok(Triple::new(
        decode_subject(&doc.s)?,
        decode_predicate(&doc.p)?,
        decode_term(&doc.o)?,
    ))
}
