//! HTTP source adapter
//!
//! This module fetches Hacker News content over HTTP:
//! - Building the HTTP client with a descriptive user agent string
//! - Listing pages from the search API (`<api-url>/search_by_date`)
//! - Discussion threads from the item page HTML
//! - Classifying transport failures into `FetchError`

use crate::config::{Config, UserAgentConfig};
use crate::source::{FetchMode, PageContent, SortOrder, SourceAdapter, ThreadContent};
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Overall timeout applied to every request
///
/// # Example
///
/// ```no_run
/// use hn_scout::config::UserAgentConfig;
/// use hn_scout::source::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Hacker News adapter backed by a single reqwest client
pub struct HttpSource {
    client: Client,
    api_url: String,
    item_url: String,
    mode: FetchMode,
    closed: AtomicBool,
}

impl HttpSource {
    /// Opens a fetch session for one run
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, config.limits.fetch_timeout())?;
        let mode = config.search.fetch_mode;

        tracing::info!("Opening fetch session ({} mode)", mode);

        Ok(Self {
            client,
            api_url: config.source.api_url.trim_end_matches('/').to_string(),
            item_url: config.source.item_url.clone(),
            mode,
            closed: AtomicBool::new(false),
        })
    }

    /// Builds the listing URL for one page of results
    pub fn search_url(&self, query: &str, sort: SortOrder, page_index: usize) -> FetchResult<Url> {
        let endpoint = format!("{}/{}", self.api_url, sort.endpoint());
        let page = page_index.to_string();

        Url::parse_with_params(
            &endpoint,
            &[("query", query), ("tags", "story"), ("page", page.as_str())],
        )
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", endpoint, e)))
    }

    fn ensure_open(&self, url: &str) -> FetchResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(FetchError::SessionClosed {
                url: url.to_string(),
            });
        }
        Ok(())
    }

    /// Sends a GET request and returns the body of a successful response
    async fn get_text(&self, url: &Url) -> FetchResult<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url.as_str(), e))?;

        read_body(url.as_str(), response).await
    }
}

#[async_trait]
impl SourceAdapter for HttpSource {
    async fn fetch_page(
        &self,
        query: &str,
        sort: SortOrder,
        page_index: usize,
    ) -> FetchResult<PageContent> {
        let url = self.search_url(query, sort, page_index)?;
        self.ensure_open(url.as_str())?;

        tracing::debug!("Fetching listing page {} ({}): {}", page_index, self.mode, url);
        let body = self.get_text(&url).await?;

        PageContent::from_json(&body, &self.item_url).map_err(|message| FetchError::Malformed {
            url: url.to_string(),
            message,
        })
    }

    async fn fetch_thread(&self, thread_url: &str) -> FetchResult<ThreadContent> {
        let url = Url::parse(thread_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", thread_url, e)))?;
        self.ensure_open(url.as_str())?;

        tracing::debug!("Fetching thread: {}", url);
        let body = self.get_text(&url).await?;

        Ok(ThreadContent::new(url.as_str(), body))
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::info!("Closing fetch session");
        }
    }
}

async fn read_body(url: &str, response: Response) -> FetchResult<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
