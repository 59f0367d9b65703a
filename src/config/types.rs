use crate::source::FetchMode;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for HN-Scout
///
/// Every table is optional; omitted tables fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub limits: LimitsConfig,
    pub source: SourceConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// What to look for
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Query text passed to the search source
    #[serde(rename = "search-term")]
    pub search_term: String,

    /// Regular expression tested against titles and comments (case-insensitive)
    #[serde(rename = "regex-pattern")]
    pub regex_pattern: String,

    /// Target number of entry matches
    #[serde(rename = "max-results")]
    pub max_results: usize,

    /// Whether to scan the discussion threads of leading matches
    #[serde(rename = "check-comments")]
    pub check_comments: bool,

    /// Fetch visibility mode, passed through to the source adapter
    #[serde(rename = "fetch-mode")]
    pub fetch_mode: FetchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_term: "EYWA".to_string(),
            regex_pattern: "EYWA|eywa".to_string(),
            max_results: 10,
            check_comments: false,
            fetch_mode: FetchMode::Visible,
        }
    }
}

/// Work bounds for a single run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Hard maximum number of listing pages fetched per run
    #[serde(rename = "page-ceiling")]
    pub page_ceiling: usize,

    /// Number of leading entry matches whose threads may be scanned
    #[serde(rename = "thread-limit")]
    pub thread_limit: usize,

    /// Maximum comments scanned per thread
    #[serde(rename = "comment-limit")]
    pub comment_limit: usize,

    /// Pause before every listing fetch after the first (milliseconds)
    #[serde(rename = "politeness-delay")]
    pub politeness_delay: u64,

    /// Timeout applied to each page or thread fetch (milliseconds)
    #[serde(rename = "fetch-timeout")]
    pub fetch_timeout: u64,

    /// Optional deadline for the whole run (milliseconds)
    #[serde(rename = "run-timeout")]
    pub run_timeout: Option<u64>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            page_ceiling: 5,
            thread_limit: 5,
            comment_limit: 50,
            politeness_delay: 1000,
            fetch_timeout: 10_000,
            run_timeout: None,
        }
    }
}

impl LimitsConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout)
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout.map(Duration::from_millis)
    }
}

/// Endpoints of the content source
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Search API base; listings come from `<api-url>/search_by_date`
    #[serde(rename = "api-url")]
    pub api_url: String,

    /// Discussion page base; threads live at `<item-url>?id=<id>`
    #[serde(rename = "item-url")]
    pub item_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: "https://hn.algolia.com/api/v1".to_string(),
            item_url: "https://news.ycombinator.com/item".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "hn-scout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/hn-scout/hn-scout".to_string(),
            contact_email: "hn-scout@users.noreply.github.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the report as JSON
    #[serde(rename = "json-path")]
    pub json_path: Option<String>,

    /// Where to write the markdown summary
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

/// Run input handed over by a task orchestrator
///
/// Every key is optional and overrides the matching `[search]` value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskInput {
    pub search_term: Option<String>,
    pub regex_pattern: Option<String>,
    pub max_results: Option<usize>,
    pub check_comments: Option<bool>,
    pub headless: Option<bool>,
}

impl TaskInput {
    /// Applies the task's values on top of the search configuration
    pub fn apply(&self, search: &mut SearchConfig) {
        if let Some(term) = &self.search_term {
            search.search_term = term.clone();
        }
        if let Some(pattern) = &self.regex_pattern {
            search.regex_pattern = pattern.clone();
        }
        if let Some(max) = self.max_results {
            search.max_results = max;
        }
        if let Some(check) = self.check_comments {
            search.check_comments = check;
        }
        if let Some(headless) = self.headless {
            search.fetch_mode = if headless {
                FetchMode::Headless
            } else {
                FetchMode::Visible
            };
        }
    }
}
