//! Entry extraction
//!
//! Turns a listing page into normalized `EntryRecord`s. Entries that cannot be
//! normalized are skipped and tallied, never surfaced as errors.

use crate::report::{EntryRecord, UNKNOWN};
use crate::source::{PageContent, RawEntry};
use crate::state::RunStats;
use crate::ExtractionError;
use chrono::{DateTime, TimeZone, Utc};

/// Extracts the entries of `page` in on-page order
pub fn extract(page: &PageContent, stats: &mut RunStats) -> Vec<EntryRecord> {
    extract_at(page, Utc::now(), stats)
}

/// Extracts entries, rendering ages relative to `now`
pub fn extract_at(page: &PageContent, now: DateTime<Utc>, stats: &mut RunStats) -> Vec<EntryRecord> {
    let mut entries = Vec::new();

    for raw in page.find_entries() {
        match raw.and_then(|raw| normalize_entry(raw, now)) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::trace!("Skipping entry: {}", e);
                stats.entries_skipped += 1;
            }
        }
    }

    entries
}

/// Normalizes one raw entry
///
/// A missing or blank title, or the absence of both a link and a thread link,
/// rejects the entry. Everything else falls back to defaults.
pub fn normalize_entry(raw: RawEntry, now: DateTime<Utc>) -> Result<EntryRecord, ExtractionError> {
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ExtractionError::MissingTitle)?
        .to_string();

    let thread_url = raw.thread_link.filter(|link| !link.trim().is_empty());

    let canonical_url = raw
        .link
        .filter(|link| !link.trim().is_empty())
        .or_else(|| thread_url.clone())
        .ok_or(ExtractionError::MissingLink)?;

    Ok(EntryRecord {
        title,
        canonical_url,
        thread_url,
        score: parse_count(raw.points.as_deref()),
        reply_count: parse_count(raw.replies.as_deref()),
        age_label: age_label(raw.created_at, now),
    })
}

/// Reads the leading integer of a count such as `"12"` or `"12 points"`
///
/// Anything unreadable, including negative numbers, counts as 0.
pub fn parse_count(text: Option<&str>) -> u64 {
    let Some(text) = text else {
        return 0;
    };

    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().unwrap_or(0)
}

/// Renders a creation timestamp as a relative age like `"3 hours ago"`
pub fn age_label(created_at: Option<i64>, now: DateTime<Utc>) -> String {
    let Some(created) = created_at.and_then(|secs| Utc.timestamp_opt(secs, 0).single()) else {
        return UNKNOWN.to_string();
    };

    let elapsed = now.signed_duration_since(created);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else if days < 30 {
        plural(days, "day")
    } else if days < 365 {
        plural(days / 30, "month")
    } else {
        plural(days / 365, "year")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
