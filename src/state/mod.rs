//! State module for tracking run progress
//!
//! # Components
//!
//! - `StopReason`: Why the pagination loop ended (budget, ceiling, exhaustion, failure)
//! - `RunStats`: Run-scoped counters passed through the search and traversal
//! - `TaskStatus`: Lifecycle status reported to the task orchestrator

mod run_stats;
mod stop_reason;
mod task_status;

// Re-export main types
pub use run_stats::RunStats;
pub use stop_reason::StopReason;
pub use task_status::TaskStatus;
