//! In-memory [`SourceAdapter`] for tests and offline replays.
//!
//! Pages and threads are served from memory. Individual pages or threads can be
//! made to fail or to stall forever, and every call is counted so callers can
//! assert on exactly what was fetched.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::source::{PageContent, SortOrder, SourceAdapter, ThreadContent};
use crate::{FetchError, FetchResult};

const DEFAULT_ITEM_URL: &str = "https://news.ycombinator.com/item";

#[derive(Debug, Clone)]
enum Behavior<T> {
    Ready(T),
    Fail,
    Stall,
}

/// Source adapter backed by canned pages and threads
#[derive(Debug)]
pub struct MemorySource {
    item_url: String,
    pages: Vec<Behavior<Vec<Value>>>,
    threads: HashMap<String, Behavior<String>>,
    page_fetches: AtomicUsize,
    thread_log: Mutex<Vec<String>>,
    closes: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            item_url: DEFAULT_ITEM_URL.to_string(),
            pages: Vec::new(),
            threads: HashMap::new(),
            page_fetches: AtomicUsize::new(0),
            thread_log: Mutex::new(Vec::new()),
            closes: AtomicUsize::new(0),
        }
    }

    /// Appends a listing page made of raw search hits
    ///
    /// The last configured page reports itself as the last one; indexes past it
    /// return an empty page.
    pub fn with_page(mut self, hits: Vec<Value>) -> Self {
        self.pages.push(Behavior::Ready(hits));
        self
    }

    /// Appends a listing page whose fetch fails
    pub fn with_failing_page(mut self) -> Self {
        self.pages.push(Behavior::Fail);
        self
    }

    /// Appends a listing page whose fetch never completes
    pub fn with_stalled_page(mut self) -> Self {
        self.pages.push(Behavior::Stall);
        self
    }

    /// Serves `html` for `thread_url`
    pub fn with_thread(mut self, thread_url: &str, html: impl Into<String>) -> Self {
        self.threads
            .insert(thread_url.to_string(), Behavior::Ready(html.into()));
        self
    }

    /// Makes the fetch of `thread_url` fail
    pub fn with_failing_thread(mut self, thread_url: &str) -> Self {
        self.threads.insert(thread_url.to_string(), Behavior::Fail);
        self
    }

    /// Makes the fetch of `thread_url` never complete
    pub fn with_stalled_thread(mut self, thread_url: &str) -> Self {
        self.threads.insert(thread_url.to_string(), Behavior::Stall);
        self
    }

    /// Thread link for a hit with the given `objectID`
    pub fn thread_url(&self, object_id: &str) -> String {
        format!("{}?id={}", self.item_url, object_id)
    }

    /// Number of listing fetches issued
    pub fn page_fetches(&self) -> usize {
        self.page_fetches.load(Ordering::SeqCst)
    }

    /// Number of thread fetches issued
    pub fn thread_fetches(&self) -> usize {
        self.fetched_threads().len()
    }

    /// Thread URLs requested, in request order
    pub fn fetched_threads(&self) -> Vec<String> {
        self.thread_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Number of times the session was closed
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceAdapter for MemorySource {
    async fn fetch_page(
        &self,
        _query: &str,
        _sort: SortOrder,
        page_index: usize,
    ) -> FetchResult<PageContent> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);

        let has_more = page_index + 1 < self.pages.len();
        match self.pages.get(page_index) {
            Some(Behavior::Ready(hits)) => {
                Ok(PageContent::new(hits.clone(), has_more, &self.item_url))
            }
            Some(Behavior::Fail) => Err(FetchError::Status {
                url: format!("memory://page/{}", page_index),
                status: 503,
            }),
            Some(Behavior::Stall) => std::future::pending().await,
            None => Ok(PageContent::new(Vec::new(), false, &self.item_url)),
        }
    }

    async fn fetch_thread(&self, thread_url: &str) -> FetchResult<ThreadContent> {
        if let Ok(mut log) = self.thread_log.lock() {
            log.push(thread_url.to_string());
        }

        match self.threads.get(thread_url) {
            Some(Behavior::Ready(html)) => Ok(ThreadContent::new(thread_url, html.clone())),
            Some(Behavior::Stall) => std::future::pending().await,
            Some(Behavior::Fail) | None => Err(FetchError::Status {
                url: thread_url.to_string(),
                status: 404,
            }),
        }
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Renders `(author, text)` pairs as a discussion page in Hacker News markup
///
/// An empty author renders a comment header without a user link.
pub fn render_thread(comments: &[(&str, &str)]) -> String {
    let mut html = String::from("<html><body><table class=\"comment-tree\">\n");

    for (index, (author, text)) in comments.iter().enumerate() {
        let user = if author.is_empty() {
            String::new()
        } else {
            format!(
                "<a href=\"user?id={0}\" class=\"hnuser\">{0}</a>",
                escape_html(author)
            )
        };

        html.push_str(&format!(
            "<tr class=\"athing comtr\" id=\"{}\"><td><table><tr><td class=\"default\">\
             <div><span class=\"comhead\">{}</span></div>\
             <div class=\"comment\"><div class=\"commtext c00\">{}</div></div>\
             </td></tr></table></td></tr>\n",
            index + 1,
            user,
            escape_html(text)
        ));
    }

    html.push_str("</table></body></html>");
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_pages_and_exhaustion() {
        let source = MemorySource::new()
            .with_page(vec![json!({"title": "a"})])
            .with_page(vec![json!({"title": "b"})]);

        let first = source.fetch_page("q", SortOrder::ByDate, 0).await.unwrap();
        assert!(first.has_more());
        let second = source.fetch_page("q", SortOrder::ByDate, 1).await.unwrap();
        assert!(!second.has_more());
        let past_end = source.fetch_page("q", SortOrder::ByDate, 2).await.unwrap();
        assert!(past_end.is_empty());

        assert_eq!(source.page_fetches(), 3);
    }

    #[tokio::test]
    async fn test_threads_are_logged() {
        let source = MemorySource::new();
        let url = source.thread_url("7");
        let source = source.with_thread(&url, render_thread(&[("alice", "hello <world>")]));

        let thread = source.fetch_thread(&url).await.unwrap();
        let comments = thread.find_comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].as_ref().unwrap().text, "hello <world>");

        assert!(source.fetch_thread("https://unknown").await.is_err());
        assert_eq!(source.fetched_threads(), vec![url, "https://unknown".to_string()]);
    }

    #[tokio::test]
    async fn test_close_is_counted() {
        let source = MemorySource::new();
        source.close().await;
        assert_eq!(source.close_count(), 1);
    }
}
