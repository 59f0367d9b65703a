//! Search module - matching, extraction, pagination and thread traversal
//!
//! This module contains the core discovery logic:
//! - Compiling the pattern and testing text against it
//! - Normalizing listing entries
//! - The pagination loop and its stop conditions
//! - Bounded traversal of matched entries' threads

mod controller;
pub mod extractor;
mod matcher;
mod traverser;

pub use controller::{decide_next, SearchController, SearchOutcome};
pub use extractor::extract;
pub use matcher::{MatchResult, PatternMatcher};
pub use traverser::ThreadTraverser;

use crate::config::Config;
use crate::source::FetchMode;
use std::time::Duration;

/// Effective parameters of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub search_term: String,
    pub max_results: usize,
    pub page_ceiling: usize,
    pub check_comments: bool,
    pub thread_limit: usize,
    pub comment_limit: usize,
    pub politeness_delay: Duration,
    pub fetch_timeout: Duration,
    pub mode: FetchMode,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            search_term: config.search.search_term.clone(),
            max_results: config.search.max_results,
            page_ceiling: config.limits.page_ceiling,
            check_comments: config.search.check_comments,
            thread_limit: config.limits.thread_limit,
            comment_limit: config.limits.comment_limit,
            politeness_delay: config.limits.politeness_delay(),
            fetch_timeout: config.limits.fetch_timeout(),
            mode: config.search.fetch_mode,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
