//! Listing and thread documents
//!
//! Listing pages arrive as search API JSON; threads arrive as the discussion
//! page HTML. Both are wrapped so that callers only see raw, possibly
//! incomplete items and never walk JSON or the DOM themselves.

use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// One listing item as found on the page, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub thread_link: Option<String>,
    /// Score as presented by the source (e.g. `"12"`)
    pub points: Option<String>,
    /// Reply count as presented by the source
    pub replies: Option<String>,
    /// Creation time, seconds since the Unix epoch
    pub created_at: Option<i64>,
}

/// One comment as found in a thread, before matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub author: Option<String>,
    pub text: String,
}

/// Search API response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Value>,
    #[serde(rename = "nbPages")]
    nb_pages: Option<u64>,
    page: Option<u64>,
}

/// A fetched page of search results
#[derive(Debug, Clone)]
pub struct PageContent {
    hits: Vec<Value>,
    has_more: bool,
    item_url: String,
}

impl PageContent {
    /// Creates a page from raw hits
    ///
    /// `item_url` is the discussion page base used to derive thread links.
    pub fn new(hits: Vec<Value>, has_more: bool, item_url: impl Into<String>) -> Self {
        Self {
            hits,
            has_more,
            item_url: item_url.into(),
        }
    }

    /// Parses a search API response body
    ///
    /// When the response carries paging metadata, `has_more` is false on the last
    /// page; otherwise any non-empty page is assumed to have a successor.
    pub fn from_json(body: &str, item_url: &str) -> Result<Self, String> {
        let response: SearchResponse = serde_json::from_str(body).map_err(|e| e.to_string())?;

        let has_more = match (response.page, response.nb_pages) {
            (Some(page), Some(nb_pages)) => page + 1 < nb_pages,
            _ => !response.hits.is_empty(),
        };

        Ok(Self::new(response.hits, has_more, item_url))
    }

    /// Returns true if the page carries no items at all
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns false if the source reported this as its last page
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns every item on the page in on-page order
    ///
    /// Items that are not even structurally readable come back as errors so the
    /// caller can skip and count them.
    pub fn find_entries(&self) -> Vec<Result<RawEntry, ExtractionError>> {
        self.hits.iter().map(|hit| self.read_entry(hit)).collect()
    }

    fn read_entry(&self, hit: &Value) -> Result<RawEntry, ExtractionError> {
        let fields = hit
            .as_object()
            .ok_or_else(|| ExtractionError::Malformed("search hit is not an object".to_string()))?;

        let thread_link = fields
            .get("objectID")
            .and_then(value_text)
            .filter(|id| !id.trim().is_empty())
            .and_then(|id| Url::parse_with_params(&self.item_url, &[("id", id.trim())]).ok())
            .map(String::from);

        Ok(RawEntry {
            title: fields.get("title").and_then(value_text),
            link: fields.get("url").and_then(value_text),
            thread_link,
            points: fields.get("points").and_then(value_text),
            replies: fields.get("num_comments").and_then(value_text),
            created_at: fields.get("created_at_i").and_then(Value::as_i64),
        })
    }
}

/// Renders scalar JSON as text; null, arrays and objects yield nothing
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A fetched discussion thread
#[derive(Debug, Clone)]
pub struct ThreadContent {
    url: String,
    body: String,
}

impl ThreadContent {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns every comment in document order, nested replies included
    ///
    /// Comments without readable text (deleted, flagged) come back as
    /// `ExtractionError::MissingText`.
    pub fn find_comments(&self) -> Vec<Result<RawComment, ExtractionError>> {
        let document = Html::parse_document(&self.body);

        let (Some(row), Some(text), Some(user)) = (
            selector("tr.athing.comtr"),
            selector(".commtext"),
            selector(".comhead .hnuser"),
        ) else {
            return Vec::new();
        };

        document
            .select(&row)
            .map(|element| read_comment(element, &text, &user))
            .collect()
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn read_comment(
    row: ElementRef<'_>,
    text_selector: &Selector,
    user_selector: &Selector,
) -> Result<RawComment, ExtractionError> {
    let body = row
        .select(text_selector)
        .next()
        .ok_or(ExtractionError::MissingText)?;

    let text = collapse_whitespace(body.text());
    if text.is_empty() {
        return Err(ExtractionError::MissingText);
    }

    let author = row
        .select(user_selector)
        .next()
        .map(|user| collapse_whitespace(user.text()))
        .filter(|name| !name.is_empty());

    Ok(RawComment { author, text })
}

fn collapse_whitespace<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
