//! Run-scoped tallies
//!
//! A single `RunStats` is created per run and passed by `&mut` through the
//! controller, extractor and traverser.

use serde::Serialize;

/// Counters accumulated over one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Listing pages fetched successfully
    pub pages_fetched: usize,

    /// Listing entries extracted and tested
    pub entries_seen: usize,

    /// Listing entries skipped because they could not be extracted
    pub entries_skipped: usize,

    /// Matching entries dropped because they were already reported
    pub duplicates_dropped: usize,

    /// Thread pages fetched successfully
    pub threads_fetched: usize,

    /// Thread fetches that failed or timed out
    pub threads_failed: usize,

    /// Comments extracted and tested
    pub comments_scanned: usize,

    /// Comments skipped because they had no readable text
    pub comments_skipped: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }
}
