//! Search backend layer for the tern triple store.
//!
//! This crate defines the contract between the triple-store facade and
//! whatever search engine holds the triple index, plus the two
//! implementations that ship with it. It speaks the
//! `tern-search-protocol` wire contract.
//!
//! # Architecture
//!
//! - [`SearchBackend`]: read half (scrolling search, count)
//! - [`DocumentSink`]: write half (bulk indexing, index admin)
//! - [`RemoteBackend`]: HTTP client for a remote engine
//! - [`MemoryBackend`]: in-memory engine for tests and embedded runs
//!
//! # Example
//!
//! ```ignore
//! use tern_search_service::{BackendConfig, RemoteBackend};
//!
//! let backend = RemoteBackend::from_config(
//!     &BackendConfig::new("http://localhost:9200"),
//! )?;
//! let page = backend.search(request).await?;
//! ```

pub mod backend;
pub mod config;
pub mod error;

pub use backend::{DocumentSink, MemoryBackend, RemoteBackend, SearchBackend};
pub use config::BackendConfig;
pub use error::{Result, ServiceError};

use tern_search_protocol::{DEFAULT_KEEP_ALIVE_MS, DEFAULT_PAGE_SIZE, MAX_KEEP_ALIVE_MS, MAX_PAGE_SIZE};

/// Scrolling configuration applied when the facade opens a pass.
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    /// Hits fetched per page.
    pub page_size: usize,
    /// Keep-alive window between pages, in milliseconds.
    pub keep_alive_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            keep_alive_ms: DEFAULT_KEEP_ALIVE_MS,
        }
    }
}

impl ScrollConfig {
    /// Clamp out-of-range settings to the protocol bounds.
    pub fn clamped(mut self) -> Self {
        if self.page_size == 0 {
            tracing::warn!(default = DEFAULT_PAGE_SIZE, "zero page size replaced with default");
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.page_size > MAX_PAGE_SIZE {
            tracing::warn!(
                requested = self.page_size,
                max = MAX_PAGE_SIZE,
                "page size clamped to max"
            );
            self.page_size = MAX_PAGE_SIZE;
        }
        if self.keep_alive_ms > MAX_KEEP_ALIVE_MS {
            tracing::warn!(
                requested = self.keep_alive_ms,
                max = MAX_KEEP_ALIVE_MS,
                "keep-alive clamped to max"
            );
            self.keep_alive_ms = MAX_KEEP_ALIVE_MS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scroll_config() {
        let config = ScrollConfig::default();
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.keep_alive_ms, 5_000);
    }

    #[test]
    fn test_clamping() {
        let config = ScrollConfig {
            page_size: 1_000_000,
            keep_alive_ms: u64::MAX,
        }
        .clamped();
        assert_eq!(config.page_size, MAX_PAGE_SIZE);
        assert_eq!(config.keep_alive_ms, MAX_KEEP_ALIVE_MS);

        let config = ScrollConfig {
            page_size: 0,
            keep_alive_ms: 100,
        }
        .clamped();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.keep_alive_ms, 100);
    }
}
