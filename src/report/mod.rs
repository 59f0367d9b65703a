//! Run report and its records
//!
//! The [`Report`] is the only output of a run. It is assembled once by
//! [`aggregate`] from the entry and comment matches, and its total count is
//! always derived from those two sequences.

mod types;

pub use types::{
    truncate_for_display, CommentMatch, EntryMatch, EntryRecord, MatchType, COMMENT_DISPLAY_LEN,
    TRUNCATION_MARKER, UNKNOWN,
};

use crate::source::FetchMode;
use crate::state::{RunStats, StopReason};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The result of one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    search_term: String,
    pattern: String,
    entry_matches: Vec<EntryMatch>,
    comment_matches: Vec<CommentMatch>,
    total_match_count: usize,
    generated_at: DateTime<Utc>,
    mode: FetchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_reason: Option<StopReason>,
    stats: RunStats,
}

/// Combines the matches of a run into a report
///
/// Pure: performs no fetching. `total_match_count` is the sum of both lengths.
pub fn aggregate(
    search_term: &str,
    pattern: &str,
    entry_matches: Vec<EntryMatch>,
    comment_matches: Vec<CommentMatch>,
    mode: FetchMode,
) -> Report {
    let total_match_count = entry_matches.len() + comment_matches.len();

    Report {
        search_term: search_term.to_string(),
        pattern: pattern.to_string(),
        entry_matches,
        comment_matches,
        total_match_count,
        generated_at: Utc::now(),
        mode,
        stop_reason: None,
        stats: RunStats::default(),
    }
}

impl Report {
    /// Attaches how the search ended and the run's tallies
    pub fn with_outcome(mut self, stop_reason: StopReason, stats: RunStats) -> Self {
        self.stop_reason = Some(stop_reason);
        self.stats = stats;
        self
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn entry_matches(&self) -> &[EntryMatch] {
        &self.entry_matches
    }

    pub fn comment_matches(&self) -> &[CommentMatch] {
        &self.comment_matches
    }

    pub fn total_match_count(&self) -> usize {
        self.total_match_count
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        self.total_match_count == 0
    }
}
