//! HN-Scout: pattern-driven discovery over Hacker News search
//!
//! This crate pages through date-sorted search results, keeps the entries whose
//! title matches a regular expression, optionally scans the discussion threads of
//! the leading matches for matching comments, and assembles a single report.

pub mod config;
pub mod output;
pub mod report;
pub mod run;
pub mod search;
pub mod source;
pub mod state;

use thiserror::Error;

/// Main error type for a scouting run
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Run cancelled")]
    Cancelled,

    #[error("Run exceeded its time limit of {0:?}")]
    TimedOut(std::time::Duration),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse task input: {0}")]
    Task(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised while fetching a listing page or a thread
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Malformed response from {url}: {message}")]
    Malformed { url: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Fetch session already closed, refusing {url}")]
    SessionClosed { url: String },
}

/// Reasons a single entry or comment could not be extracted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("entry has no title")]
    MissingTitle,

    #[error("entry has no usable link")]
    MissingLink,

    #[error("comment has no text")]
    MissingText,

    #[error("malformed item: {0}")]
    Malformed(String),
}

/// Result type alias for run operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use report::{CommentMatch, EntryMatch, EntryRecord, Report};
pub use run::execute;
pub use search::{MatchResult, PatternMatcher};
pub use source::{FetchMode, SourceAdapter};
pub use state::{RunStats, StopReason, TaskStatus};
