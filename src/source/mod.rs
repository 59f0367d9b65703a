//! Source adapter boundary
//!
//! The search core only ever talks to a [`SourceAdapter`]: it asks for a listing
//! page or a discussion thread and receives a document that exposes
//! `find_entries()` / `find_comments()`. How pages are fetched, and whether they
//! arrive as JSON or HTML, stays behind this boundary.
//!
//! - `document`: listing and thread documents and their raw item types
//! - `http`: the reqwest-backed adapter for Hacker News
//! - `memory`: canned pages and threads for tests and offline replays

mod document;
mod http;
pub mod memory;

pub use document::{PageContent, RawComment, RawEntry, ThreadContent};
pub use http::{build_http_client, HttpSource};
pub use memory::{render_thread, MemorySource};

use crate::FetchResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fetch visibility mode
///
/// Passed through to the adapter untouched; it never influences matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    #[default]
    Visible,
    Headless,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Headless => "headless",
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordering requested from the listing source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first
    ByDate,
    /// Source-defined relevance
    ByRelevance,
}

impl SortOrder {
    /// Search endpoint name for this ordering
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::ByDate => "search_by_date",
            Self::ByRelevance => "search",
        }
    }
}

/// A pull-based provider of listing pages and discussion threads
///
/// One adapter instance is one fetch session. It is owned by a single run,
/// and `close` is awaited once when the run ends, however it ends.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fetches one page of search results (`page_index` is zero-based)
    async fn fetch_page(
        &self,
        query: &str,
        sort: SortOrder,
        page_index: usize,
    ) -> FetchResult<PageContent>;

    /// Fetches the discussion thread at `thread_url`
    async fn fetch_thread(&self, thread_url: &str) -> FetchResult<ThreadContent>;

    /// Releases the underlying session
    async fn close(&self) {}
}
