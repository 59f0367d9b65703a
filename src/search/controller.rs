//! Search controller - the pagination loop
//!
//! Pages are requested strictly in order, each one is extracted and its titles
//! are tested against the pattern. After every page the controller decides
//! whether to continue:
//!
//! ```text
//! Start → FetchPage → ExtractAndMatch → DecidePage → (FetchPage | Stop)
//! ```
//!
//! Fetch failures end the loop instead of being retried; whatever was matched
//! so far is always returned.

use crate::report::EntryMatch;
use crate::search::extractor::extract;
use crate::search::{MatchResult, PatternMatcher, SearchSettings};
use crate::source::{PageContent, SortOrder, SourceAdapter};
use crate::state::{RunStats, StopReason};
use crate::{FetchError, FetchResult};
use std::collections::HashSet;

/// Entry matches of one search and why it ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// First `max_results` matches, in traversal order
    pub matches: Vec<EntryMatch>,
    pub stop_reason: StopReason,
}

/// Drives the pagination loop for one run
pub struct SearchController<'a, S: SourceAdapter + ?Sized> {
    source: &'a S,
    matcher: &'a PatternMatcher,
    settings: &'a SearchSettings,
}

impl<'a, S: SourceAdapter + ?Sized> SearchController<'a, S> {
    pub fn new(source: &'a S, matcher: &'a PatternMatcher, settings: &'a SearchSettings) -> Self {
        Self {
            source,
            matcher,
            settings,
        }
    }

    /// Runs the loop until a stop condition holds
    pub async fn run(&self, stats: &mut RunStats) -> SearchOutcome {
        let mut matches = Vec::new();
        let mut seen = HashSet::new();
        let mut page_index = 0;

        tracing::info!(
            "Searching for '{}' matching /{}/",
            self.settings.search_term,
            self.matcher.as_str()
        );

        let stop_reason = loop {
            if page_index > 0 && !self.settings.politeness_delay.is_zero() {
                tokio::time::sleep(self.settings.politeness_delay).await;
            }

            let page = match self.fetch_page(page_index).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Stopping search, page {} failed: {}", page_index, e);
                    break StopReason::FetchFailed;
                }
            };
            stats.pages_fetched += 1;

            let entries = extract(&page, stats);
            if entries.is_empty() {
                tracing::info!("No more results found (page {})", page_index);
                break StopReason::SourceExhausted;
            }

            tracing::debug!("Page {}: {} entries", page_index, entries.len());

            for entry in entries {
                stats.entries_seen += 1;

                let MatchResult::Matched(matched_text) = self.matcher.test(&entry.title) else {
                    continue;
                };

                if !seen.insert(entry.dedup_key().to_string()) {
                    stats.duplicates_dropped += 1;
                    continue;
                }

                tracing::info!("Found match #{}: {}", matches.len() + 1, entry.title);
                matches.push(EntryMatch::new(entry, matched_text));
            }

            if let Some(reason) =
                decide_next(matches.len(), page_index + 1, page.has_more(), self.settings)
            {
                break reason;
            }

            page_index += 1;
        };

        matches.truncate(self.settings.max_results);

        tracing::info!(
            "Search finished ({}): {} matches over {} pages",
            stop_reason,
            matches.len(),
            stats.pages_fetched
        );

        SearchOutcome {
            matches,
            stop_reason,
        }
    }

    async fn fetch_page(&self, page_index: usize) -> FetchResult<PageContent> {
        let fetch = self
            .source
            .fetch_page(&self.settings.search_term, SortOrder::ByDate, page_index);

        match tokio::time::timeout(self.settings.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: format!("listing page {}", page_index),
            }),
        }
    }
}

/// Decides whether the loop stops after a page
///
/// Checked in order: the match budget, the page ceiling, then the source's own
/// last-page signal. Returns `None` to fetch the next page.
pub fn decide_next(
    match_count: usize,
    pages_fetched: usize,
    has_more: bool,
    settings: &SearchSettings,
) -> Option<StopReason> {
    if match_count >= settings.max_results {
        Some(StopReason::BudgetMet)
    } else if pages_fetched >= settings.page_ceiling {
        Some(StopReason::PageCeiling)
    } else if !has_more {
        Some(StopReason::SourceExhausted)
    } else {
        None
    }
}
