//! Records produced while searching and traversing threads

use serde::Serialize;

/// Maximum number of characters of comment text kept in a match
pub const COMMENT_DISPLAY_LEN: usize = 200;

/// Appended to comment text that was cut at `COMMENT_DISPLAY_LEN`
pub const TRUNCATION_MARKER: &str = "...";

/// Placeholder for values the source did not provide
pub const UNKNOWN: &str = "unknown";

/// One normalized listing entry
///
/// Built by the extractor; `title` is never empty and `canonical_url` is
/// always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    pub title: String,
    pub canonical_url: String,
    pub thread_url: Option<String>,
    pub score: u64,
    pub reply_count: u64,
    pub age_label: String,
}

impl EntryRecord {
    /// Returns true if the entry has a discussion worth fetching
    pub fn has_discussion(&self) -> bool {
        self.reply_count > 0
            && self
                .thread_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty())
    }

    /// Key used to recognize the same entry across pages
    pub fn dedup_key(&self) -> &str {
        self.thread_url.as_deref().unwrap_or(&self.canonical_url)
    }
}

/// Where a match was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Title,
}

/// An entry whose title matched the pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryMatch {
    #[serde(flatten)]
    pub entry: EntryRecord,
    pub match_type: MatchType,
    pub matched_text: String,
}

impl EntryMatch {
    pub fn new(entry: EntryRecord, matched_text: String) -> Self {
        Self {
            entry,
            match_type: MatchType::Title,
            matched_text,
        }
    }
}

/// A comment inside a matched entry's thread that matched the pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentMatch {
    pub entry_title: String,
    pub thread_url: String,
    pub author: String,
    pub text: String,
    pub matched_text: String,
}

impl CommentMatch {
    /// Builds a match, defaulting the author and truncating the text for display
    pub fn new(
        parent: &EntryMatch,
        thread_url: &str,
        author: Option<String>,
        text: &str,
        matched_text: String,
    ) -> Self {
        Self {
            entry_title: parent.entry.title.clone(),
            thread_url: thread_url.to_string(),
            author: author.unwrap_or_else(|| UNKNOWN.to_string()),
            text: truncate_for_display(text),
            matched_text,
        }
    }
}

/// Cuts text to `COMMENT_DISPLAY_LEN` characters, appending the marker when cut
///
/// Counts Unicode scalar values, so the cut never lands inside a character.
pub fn truncate_for_display(text: &str) -> String {
    match text.char_indices().nth(COMMENT_DISPLAY_LEN) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(thread_url: Option<&str>, reply_count: u64) -> EntryRecord {
        EntryRecord {
            title: "Robots everywhere".to_string(),
            canonical_url: "https://example.com/robots".to_string(),
            thread_url: thread_url.map(str::to_string),
            score: 10,
            reply_count,
            age_label: "2 hours ago".to_string(),
        }
    }

    #[test]
    fn test_has_discussion() {
        assert!(entry(Some("https://news.ycombinator.com/item?id=1"), 3).has_discussion());
        assert!(!entry(Some("https://news.ycombinator.com/item?id=1"), 0).has_discussion());
        assert!(!entry(None, 3).has_discussion());
        assert!(!entry(Some("  "), 3).has_discussion());
    }

    #[test]
    fn test_dedup_key_prefers_thread() {
        assert_eq!(
            entry(Some("https://news.ycombinator.com/item?id=1"), 0).dedup_key(),
            "https://news.ycombinator.com/item?id=1"
        );
        assert_eq!(entry(None, 0).dedup_key(), "https://example.com/robots");
    }

    #[test]
    fn test_short_text_untouched() {
        let text = "a".repeat(COMMENT_DISPLAY_LEN);
        assert_eq!(truncate_for_display(&text), text);
        assert_eq!(truncate_for_display(""), "");
    }

    #[test]
    fn test_long_text_truncated() {
        let text = "b".repeat(COMMENT_DISPLAY_LEN + 1);
        let truncated = truncate_for_display(&text);
        assert_eq!(
            truncated,
            format!("{}{}", "b".repeat(COMMENT_DISPLAY_LEN), TRUNCATION_MARKER)
        );
    }

    #[test]
    fn test_truncation_respects_multibyte_characters() {
        let text = "é🤖".repeat(150);
        let truncated = truncate_for_display(&text);
        let kept = truncated.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(kept.chars().count(), COMMENT_DISPLAY_LEN);
        assert!(text.starts_with(kept));
    }

    #[test]
    fn test_comment_match_defaults_author() {
        let parent = EntryMatch::new(entry(None, 1), "Robot".to_string());
        let comment = CommentMatch::new(
            &parent,
            "https://news.ycombinator.com/item?id=1",
            None,
            "robots",
            "robot".to_string(),
        );
        assert_eq!(comment.author, UNKNOWN);
        assert_eq!(comment.entry_title, "Robots everywhere");
    }

    #[test]
    fn test_entry_match_serializes_flat() {
        let matched = EntryMatch::new(entry(None, 0), "Robot".to_string());
        let value = serde_json::to_value(&matched).unwrap();
        assert_eq!(value["title"], "Robots everywhere");
        assert_eq!(value["match_type"], "title");
        assert_eq!(value["matched_text"], "Robot");
        assert!(value["thread_url"].is_null());
    }
}
