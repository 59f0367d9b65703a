//! Output module for delivering run statuses and reports
//!
//! This module handles:
//! - The `ReportSink` boundary between a run and whoever consumes its result
//! - Printing reports to the console
//! - Writing JSON reports and markdown summaries to files

mod console;
mod json;
mod markdown;
mod traits;

pub use console::ConsoleSink;
pub use json::{format_json_report, write_json_report, JsonFileSink};
pub use markdown::{format_markdown_summary, generate_markdown_summary, MarkdownSink};
pub use traits::{OutputError, OutputResult, ReportSink};

use crate::report::Report;
use crate::state::TaskStatus;

/// Fans statuses and reports out to several sinks, in order
///
/// Every sink is attempted even if an earlier one fails; the first failure is
/// returned.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink to the end of the fan-out
    pub fn with(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each(&self, f: impl Fn(&dyn ReportSink) -> OutputResult<()>) -> OutputResult<()> {
        let mut first_error = None;

        for sink in &self.sinks {
            if let Err(e) = f(sink.as_ref()) {
                tracing::warn!("Report sink failed: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ReportSink for MultiSink {
    fn status(&self, status: TaskStatus) -> OutputResult<()> {
        self.each(|sink| sink.status(status))
    }

    fn report(&self, message: &str, report: &Report) -> OutputResult<()> {
        self.each(|sink| sink.report(message, report))
    }
}
