//! In-memory search engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tern_search_protocol::{
    fields, BulkRequest, ClauseValue, CountRequest, CreateIndexRequest, Document, FilterQuery,
    RefreshRequest, ScrollRequest, SearchPage, SearchRequest, TermClause, DEFAULT_KEEP_ALIVE_MS,
    PROTOCOL_VERSION,
};

use crate::backend::{DocumentSink, SearchBackend};
use crate::error::{Result, ServiceError};

/// In-memory search engine.
///
/// Implements the full backend contract against plain vectors, with
/// real scroll-context bookkeeping: contexts expire on their keep-alive
/// deadline, a full page keeps the context alive and carries a token,
/// and a short page drops it. Used as a test double and for embedded
/// runs that have no engine to talk to.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
    search_calls: AtomicU64,
    scroll_calls: AtomicU64,
}

#[derive(Debug, Default)]
struct State {
    indexes: HashMap<String, Vec<Document>>,
    scrolls: HashMap<String, ScrollSession>,
    next_scroll_id: u64,
}

#[derive(Debug)]
struct ScrollSession {
    hits: Vec<Document>,
    cursor: usize,
    page_size: usize,
    total: u64,
    keep_alive: Duration,
    deadline: Instant,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of first-page searches served so far.
    pub fn search_calls(&self) -> u64 {
        self.search_calls.load(Ordering::Relaxed)
    }

    /// Number of continuation pages served so far.
    pub fn scroll_calls(&self) -> u64 {
        self.scroll_calls.load(Ordering::Relaxed)
    }

    /// Number of scroll contexts currently alive.
    pub fn open_scrolls(&self) -> usize {
        let mut state = self.locked();
        state.expire_scrolls(Instant::now());
        state.scrolls.len()
    }

    fn locked(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn expire_scrolls(&mut self, now: Instant) {
        self.scrolls.retain(|_, session| now < session.deadline);
    }

    fn open_scroll(
        &mut self,
        hits: Vec<Document>,
        page_size: usize,
        keep_alive: Duration,
        now: Instant,
    ) -> (Vec<Document>, Option<String>) {
        let first: Vec<Document> = hits.iter().take(page_size).cloned().collect();
        if first.len() < page_size {
            // Short first page: the pass is already complete.
            return (first, None);
        }
        let total = hits.len() as u64;
        self.next_scroll_id += 1;
        let id = format!("scroll-{}", self.next_scroll_id);
        self.scrolls.insert(
            id.clone(),
            ScrollSession {
                hits,
                cursor: first.len(),
                page_size,
                total,
                keep_alive,
                deadline: now + keep_alive,
            },
        );
        (first, Some(id))
    }
}

fn check_protocol_version(version: &str) -> Result<()> {
    if version != PROTOCOL_VERSION {
        return Err(ServiceError::InvalidRequest {
            message: format!(
                "unsupported protocol version: {} (expected {})",
                version, PROTOCOL_VERSION
            ),
        });
    }
    Ok(())
}

fn query_matches(doc: &Document, query: &FilterQuery) -> bool {
    query.clauses.iter().all(|clause| clause_matches(doc, clause))
}

fn clause_matches(doc: &Document, clause: &TermClause) -> bool {
    match (clause.field.as_str(), &clause.value) {
        (fields::S, ClauseValue::Text(v)) => doc.s == *v,
        (fields::P, ClauseValue::Text(v)) => doc.p == *v,
        (fields::O, ClauseValue::Text(v)) => doc.o == *v,
        (fields::C, ClauseValue::Text(v)) => doc.c.as_deref() == Some(v.as_str()),
        (fields::O_LANG, ClauseValue::Text(v)) => doc.o_lang.as_deref() == Some(v.as_str()),
        (fields::O_BOOLEAN, ClauseValue::Bool(v)) => doc.o_b == Some(*v),
        (fields::O_LONG, ClauseValue::Long(v)) => doc.o_l == Some(*v),
        (fields::O_DOUBLE, ClauseValue::Double(v)) => doc.o_f == Some(*v),
        (fields::O_DATE, ClauseValue::Text(v)) => doc.o_d.as_deref() == Some(v.as_str()),
        (fields::O_STRING, ClauseValue::Text(v)) => doc.o_s.as_deref() == Some(v.as_str()),
        _ => false,
    }
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn search(&self, request: SearchRequest) -> Result<SearchPage> {
        self.search_calls.fetch_add(1, Ordering::Relaxed);
        check_protocol_version(&request.protocol_version)?;
        if request.page_size == 0 {
            return Err(ServiceError::InvalidRequest {
                message: "page_size must be positive".to_string(),
            });
        }

        let now = Instant::now();
        let mut state = self.locked();
        state.expire_scrolls(now);

        let docs = state
            .indexes
            .get(&request.index)
            .ok_or_else(|| ServiceError::IndexNotFound {
                index: request.index.clone(),
            })?;
        let hits: Vec<Document> = docs
            .iter()
            .filter(|doc| query_matches(doc, &request.query))
            .cloned()
            .collect();
        let total = hits.len() as u64;

        let keep_alive =
            Duration::from_millis(request.keep_alive_ms.unwrap_or(DEFAULT_KEEP_ALIVE_MS));
        let (page, scroll_id) = state.open_scroll(hits, request.page_size, keep_alive, now);

        let mut response = SearchPage::new(PROTOCOL_VERSION.to_string(), page, total, 0);
        if let Some(id) = scroll_id {
            response = response.with_scroll_id(id);
        }
        if let Some(request_id) = request.request_id {
            response = response.with_request_id(request_id);
        }
        Ok(response)
    }

    async fn scroll(&self, request: ScrollRequest) -> Result<SearchPage> {
        self.scroll_calls.fetch_add(1, Ordering::Relaxed);
        check_protocol_version(&request.protocol_version)?;

        let now = Instant::now();
        let mut state = self.locked();
        state.expire_scrolls(now);

        let (page, total, full) = {
            let session = state.scrolls.get_mut(&request.scroll_id).ok_or_else(|| {
                ServiceError::ScrollExpired {
                    scroll_id: request.scroll_id.clone(),
                }
            })?;
            let page: Vec<Document> = session.hits[session.cursor..]
                .iter()
                .take(session.page_size)
                .cloned()
                .collect();
            session.cursor += page.len();
            let full = page.len() == session.page_size;
            if full {
                // Each served page renews the keep-alive window.
                let keep_alive = request
                    .keep_alive_ms
                    .map(Duration::from_millis)
                    .unwrap_or(session.keep_alive);
                session.keep_alive = keep_alive;
                session.deadline = now + keep_alive;
            }
            (page, session.total, full)
        };
        if !full {
            state.scrolls.remove(&request.scroll_id);
        }

        let mut response = SearchPage::new(PROTOCOL_VERSION.to_string(), page, total, 0);
        if full {
            response = response.with_scroll_id(request.scroll_id);
        }
        Ok(response)
    }

    async fn count(&self, request: CountRequest) -> Result<u64> {
        check_protocol_version(&request.protocol_version)?;
        let state = self.locked();
        let docs = state
            .indexes
            .get(&request.index)
            .ok_or_else(|| ServiceError::IndexNotFound {
                index: request.index.clone(),
            })?;
        Ok(docs
            .iter()
            .filter(|doc| query_matches(doc, &request.query))
            .count() as u64)
    }
}

#[async_trait]
impl DocumentSink for MemoryBackend {
    async fn bulk(&self, request: BulkRequest) -> Result<u64> {
        check_protocol_version(&request.protocol_version)?;
        let mut state = self.locked();
        let indexed = request.actions.len() as u64;
        state
            .indexes
            .entry(request.index)
            .or_default()
            .extend(request.actions);
        Ok(indexed)
    }

    async fn create_index(&self, request: CreateIndexRequest) -> Result<bool> {
        check_protocol_version(&request.protocol_version)?;
        let mut state = self.locked();
        if state.indexes.contains_key(&request.index) {
            return Ok(false);
        }
        state.indexes.insert(request.index, Vec::new());
        Ok(true)
    }

    async fn refresh(&self, request: RefreshRequest) -> Result<()> {
        check_protocol_version(&request.protocol_version)?;
        let state = self.locked();
        if !state.indexes.contains_key(&request.index) {
            return Err(ServiceError::IndexNotFound {
                index: request.index,
            });
        }
        Ok(())
    }
}
