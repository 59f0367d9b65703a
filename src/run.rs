//! Run lifecycle
//!
//! One run goes through:
//!
//! ```text
//! Processing → compile pattern → open session → search → traverse → aggregate → report → Success
//! ```
//!
//! Any configuration failure, timeout or cancellation ends the run with an
//! `Error` status and no report. The fetch session is opened only after the
//! pattern compiled, and once opened it is closed exactly once however the
//! run ends.

use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::output::ReportSink;
use crate::report::{aggregate, CommentMatch, Report};
use crate::search::{PatternMatcher, SearchController, SearchOutcome, SearchSettings, ThreadTraverser};
use crate::source::{HttpSource, SourceAdapter};
use crate::state::{RunStats, TaskStatus};
use crate::{Result, ScoutError};

/// Message delivered with every successful report
pub const COMPLETION_MESSAGE: &str = "HN scraping complete";

/// Runs one search against Hacker News and delivers the report to `sink`
///
/// `cancel` aborts the run when it completes; pass `std::future::pending()`
/// for a run that can only end on its own.
pub async fn execute<F>(config: &Config, sink: &dyn ReportSink, cancel: F) -> Result<Report>
where
    F: Future<Output = ()>,
{
    execute_with(config, sink, cancel, |config| Ok(HttpSource::new(config)?)).await
}

/// Like [`execute`], with the fetch session produced by `open`
///
/// `open` is not called when the pattern fails to compile.
pub async fn execute_with<S, O, F>(
    config: &Config,
    sink: &dyn ReportSink,
    cancel: F,
    open: O,
) -> Result<Report>
where
    S: SourceAdapter,
    O: FnOnce(&Config) -> Result<S>,
    F: Future<Output = ()>,
{
    sink.status(TaskStatus::Processing)?;

    let result = async {
        let matcher = PatternMatcher::new(&config.search.regex_pattern)?;
        let source = open(config)?;
        let settings = SearchSettings::from_config(config);

        run_with_source(
            &source,
            &matcher,
            &settings,
            config.limits.run_timeout(),
            cancel,
        )
        .await
    }
    .await
    .and_then(|report| {
        sink.report(COMPLETION_MESSAGE, &report)?;
        sink.status(TaskStatus::Success)?;
        Ok(report)
    });

    match result {
        Ok(report) => {
            tracing::info!(
                "Run complete: {} entry matches, {} comment matches",
                report.entry_matches().len(),
                report.comment_matches().len()
            );
            Ok(report)
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            if let Err(sink_error) = sink.status(TaskStatus::Error) {
                tracing::warn!("Could not signal failure: {}", sink_error);
            }
            Err(e)
        }
    }
}

/// Searches, traverses and aggregates over an already opened session
///
/// The work races against `cancel` and the optional `run_timeout`. The session
/// is closed exactly once before this returns, on every path.
pub async fn run_with_source<S, F>(
    source: &S,
    matcher: &PatternMatcher,
    settings: &SearchSettings,
    run_timeout: Option<Duration>,
    cancel: F,
) -> Result<Report>
where
    S: SourceAdapter + ?Sized,
    F: Future<Output = ()>,
{
    let work = gather(source, matcher, settings);

    let bounded = async {
        match run_timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| ScoutError::TimedOut(limit)),
            None => Ok(work.await),
        }
    };

    let result = tokio::select! {
        result = bounded => result,
        _ = cancel => {
            tracing::warn!("Run cancelled");
            Err(ScoutError::Cancelled)
        }
    };

    source.close().await;

    let gathered = result?;
    let report = aggregate(
        &settings.search_term,
        matcher.as_str(),
        gathered.outcome.matches,
        gathered.comments,
        settings.mode,
    )
    .with_outcome(gathered.outcome.stop_reason, gathered.stats);

    Ok(report)
}

/// Everything a finished search produced, before aggregation
struct Gathered {
    outcome: SearchOutcome,
    comments: Vec<CommentMatch>,
    stats: RunStats,
}

async fn gather<S>(source: &S, matcher: &PatternMatcher, settings: &SearchSettings) -> Gathered
where
    S: SourceAdapter + ?Sized,
{
    let mut stats = RunStats::new();

    let outcome = SearchController::new(source, matcher, settings)
        .run(&mut stats)
        .await;

    let comments = if settings.check_comments && !outcome.matches.is_empty() {
        ThreadTraverser::new(source, matcher, settings)
            .traverse_all(&outcome.matches, &mut stats)
            .await
    } else {
        Vec::new()
    };

    Gathered {
        outcome,
        comments,
        stats,
    }
}
