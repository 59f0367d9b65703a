//! Report sink trait and errors
//!
//! A sink receives the lifecycle status of a run and, at most once, its
//! finished report. Implementations must be thread-safe.

use crate::report::Report;
use crate::state::TaskStatus;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a run's status updates and report
pub trait ReportSink: Send + Sync {
    /// Records a lifecycle status change
    ///
    /// Sinks that only care about the finished report can ignore this.
    fn status(&self, status: TaskStatus) -> OutputResult<()> {
        let _ = status;
        Ok(())
    }

    /// Delivers the finished report together with a short human message
    fn report(&self, message: &str, report: &Report) -> OutputResult<()>;
}
