//! Console output
//!
//! Statuses go to the log; the report is printed to stdout as JSON so it can
//! be piped into other tools.

use crate::output::json::format_json_report;
use crate::output::traits::{OutputResult, ReportSink};
use crate::report::Report;
use crate::state::TaskStatus;
use std::io::Write;

/// Sink that logs statuses and prints the report to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for ConsoleSink {
    fn status(&self, status: TaskStatus) -> OutputResult<()> {
        match status {
            TaskStatus::Error => tracing::error!("Task status: {}", status),
            _ => tracing::info!("Task status: {}", status),
        }
        Ok(())
    }

    fn report(&self, message: &str, report: &Report) -> OutputResult<()> {
        let json = format_json_report(message, report)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", json)?;
        handle.flush()?;

        Ok(())
    }
}
