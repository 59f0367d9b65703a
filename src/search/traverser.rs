//! Thread traversal
//!
//! Scans the discussion threads of the leading entry matches for comments that
//! match the pattern. Only entries with a thread link and at least one reply are
//! fetched; a failed thread yields nothing and never stops the others.

use crate::report::{CommentMatch, EntryMatch};
use crate::search::{MatchResult, PatternMatcher, SearchSettings};
use crate::source::{SourceAdapter, ThreadContent};
use crate::state::RunStats;
use crate::{FetchError, FetchResult};

/// Fetches and scans threads for one run
pub struct ThreadTraverser<'a, S: SourceAdapter + ?Sized> {
    source: &'a S,
    matcher: &'a PatternMatcher,
    settings: &'a SearchSettings,
}

impl<'a, S: SourceAdapter + ?Sized> ThreadTraverser<'a, S> {
    pub fn new(source: &'a S, matcher: &'a PatternMatcher, settings: &'a SearchSettings) -> Self {
        Self {
            source,
            matcher,
            settings,
        }
    }

    /// Traverses the threads of the first `thread_limit` matches, in order
    pub async fn traverse_all(
        &self,
        matches: &[EntryMatch],
        stats: &mut RunStats,
    ) -> Vec<CommentMatch> {
        let mut found = Vec::new();

        for entry_match in matches.iter().take(self.settings.thread_limit) {
            found.extend(self.traverse(entry_match, stats).await);
        }

        found
    }

    /// Scans one matched entry's thread
    ///
    /// Returns nothing, without fetching, for entries that have no discussion.
    pub async fn traverse(
        &self,
        entry_match: &EntryMatch,
        stats: &mut RunStats,
    ) -> Vec<CommentMatch> {
        let entry = &entry_match.entry;
        let thread_url = match entry.thread_url.as_deref() {
            Some(url) if entry.has_discussion() => url,
            _ => {
                tracing::debug!("No discussion to check for: {}", entry.title);
                return Vec::new();
            }
        };

        tracing::info!("Checking comments for: {}", entry.title);

        let thread = match self.fetch_thread(thread_url).await {
            Ok(thread) => thread,
            Err(e) => {
                tracing::warn!("Skipping thread for '{}': {}", entry.title, e);
                stats.threads_failed += 1;
                return Vec::new();
            }
        };
        stats.threads_fetched += 1;

        let mut found = Vec::new();

        for comment in thread
            .find_comments()
            .into_iter()
            .take(self.settings.comment_limit)
        {
            let comment = match comment {
                Ok(comment) => comment,
                Err(e) => {
                    tracing::trace!("Skipping comment in {}: {}", thread.url(), e);
                    stats.comments_skipped += 1;
                    continue;
                }
            };
            stats.comments_scanned += 1;

            if let MatchResult::Matched(matched_text) = self.matcher.test(&comment.text) {
                found.push(CommentMatch::new(
                    entry_match,
                    thread_url,
                    comment.author,
                    &comment.text,
                    matched_text,
                ));
            }
        }

        tracing::debug!("{} matching comments in {}", found.len(), thread_url);

        found
    }

    async fn fetch_thread(&self, thread_url: &str) -> FetchResult<ThreadContent> {
        match tokio::time::timeout(
            self.settings.fetch_timeout,
            self.source.fetch_thread(thread_url),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: thread_url.to_string(),
            }),
        }
    }
}
