//! Markdown summary generation
//!
//! This module renders a human-readable markdown summary of a run: the
//! matched entries as a table, excerpts of matching comments, and the run
//! statistics.

use crate::output::traits::{OutputResult, ReportSink};
use crate::report::Report;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the markdown summary of a report to a file
///
/// # Arguments
///
/// * `report` - The finished run report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(report: &Report, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a report as markdown
pub fn format_markdown_summary(report: &Report) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# HN-Scout Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Search Term**: {}\n", report.search_term()));
    md.push_str(&format!("- **Pattern**: `{}`\n", report.pattern()));
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at().to_rfc3339()
    ));
    md.push_str(&format!("- **Mode**: {}\n", report.mode()));
    if let Some(reason) = report.stop_reason() {
        md.push_str(&format!("- **Stopped**: {}\n", reason));
    }
    md.push_str(&format!(
        "- **Total Matches**: {}\n\n",
        report.total_match_count()
    ));

    // Entry matches
    md.push_str("## Matching Entries\n\n");
    if report.entry_matches().is_empty() {
        md.push_str("No matching entries.\n\n");
    } else {
        md.push_str("| # | Title | Match | Score | Replies | Age |\n");
        md.push_str("|---|-------|-------|-------|---------|-----|\n");

        for (index, matched) in report.entry_matches().iter().enumerate() {
            let entry = &matched.entry;
            md.push_str(&format!(
                "| {} | [{}]({}) | {} | {} | {} | {} |\n",
                index + 1,
                escape_cell(&entry.title),
                entry.canonical_url,
                escape_cell(&matched.matched_text),
                entry.score,
                entry.reply_count,
                entry.age_label
            ));
        }
        md.push('\n');
    }

    // Comment matches
    if !report.comment_matches().is_empty() {
        md.push_str("## Matching Comments\n\n");
        for comment in report.comment_matches() {
            md.push_str(&format!(
                "### {} ([thread]({}))\n\n",
                comment.entry_title, comment.thread_url
            ));
            md.push_str(&format!(
                "**{}** matched `{}`:\n\n",
                comment.author, comment.matched_text
            ));
            md.push_str(&format!("> {}\n\n", comment.text));
        }
    }

    // Statistics
    let stats = report.stats();
    md.push_str("## Statistics\n\n");
    md.push_str("| Counter | Value |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Pages Fetched | {} |\n", stats.pages_fetched));
    md.push_str(&format!("| Entries Seen | {} |\n", stats.entries_seen));
    md.push_str(&format!("| Entries Skipped | {} |\n", stats.entries_skipped));
    md.push_str(&format!(
        "| Duplicates Dropped | {} |\n",
        stats.duplicates_dropped
    ));
    md.push_str(&format!("| Threads Fetched | {} |\n", stats.threads_fetched));
    md.push_str(&format!("| Threads Failed | {} |\n", stats.threads_failed));
    md.push_str(&format!(
        "| Comments Scanned | {} |\n",
        stats.comments_scanned
    ));
    md.push_str(&format!(
        "| Comments Skipped | {} |\n",
        stats.comments_skipped
    ));

    md
}

/// Keeps table rows intact when titles contain pipes or line breaks
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Sink that writes the markdown summary to a file
#[derive(Debug, Clone)]
pub struct MarkdownSink {
    path: PathBuf,
}

impl MarkdownSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for MarkdownSink {
    fn report(&self, _message: &str, report: &Report) -> OutputResult<()> {
        generate_markdown_summary(report, &self.path)?;
        tracing::info!("Summary written to: {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{aggregate, CommentMatch, EntryMatch, EntryRecord};
    use crate::source::FetchMode;
    use crate::state::{RunStats, StopReason};

    fn create_test_report() -> Report {
        let matched = EntryMatch::new(
            EntryRecord {
                title: "Robots | everywhere".to_string(),
                canonical_url: "https://example.com/robots".to_string(),
                thread_url: Some("https://news.ycombinator.com/item?id=1".to_string()),
                score: 42,
                reply_count: 7,
                age_label: "2 hours ago".to_string(),
            },
            "Robot".to_string(),
        );
        let comment = CommentMatch::new(
            &matched,
            "https://news.ycombinator.com/item?id=1",
            Some("alice".to_string()),
            "my robot vacuums",
            "robot".to_string(),
        );

        let stats = RunStats {
            pages_fetched: 3,
            threads_fetched: 1,
            ..RunStats::default()
        };

        aggregate("robots", "robot", vec![matched], vec![comment], FetchMode::Visible)
            .with_outcome(StopReason::SourceExhausted, stats)
    }

    #[test]
    fn test_format_markdown_summary() {
        let markdown = format_markdown_summary(&create_test_report());

        assert!(markdown.contains("# HN-Scout Report"));
        assert!(markdown.contains("- **Pattern**: `robot`"));
        assert!(markdown.contains("- **Stopped**: source_exhausted"));
        assert!(markdown.contains("- **Total Matches**: 2"));
        assert!(markdown.contains("| 1 | [Robots \\| everywhere](https://example.com/robots) | Robot | 42 | 7 | 2 hours ago |"));
    }

    #[test]
    fn test_markdown_contains_comments_and_statistics() {
        let markdown = format_markdown_summary(&create_test_report());

        assert!(markdown.contains("## Matching Comments"));
        assert!(markdown.contains("**alice** matched `robot`"));
        assert!(markdown.contains("> my robot vacuums"));
        assert!(markdown.contains("| Pages Fetched | 3 |"));
        assert!(markdown.contains("| Threads Fetched | 1 |"));
    }

    #[test]
    fn test_markdown_for_empty_report() {
        let report = aggregate("robots", "robot", vec![], vec![], FetchMode::Headless);
        let markdown = format_markdown_summary(&report);

        assert!(markdown.contains("No matching entries."));
        assert!(!markdown.contains("## Matching Comments"));
        assert!(!markdown.contains("Stopped"));
    }

    #[test]
    fn test_markdown_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");

        MarkdownSink::new(&path)
            .report("done", &create_test_report())
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# HN-Scout Report"));
    }
}
