//! Termination reasons for the pagination loop

use serde::Serialize;
use std::fmt;

/// Why the pagination loop ended
///
/// Every search run terminates with exactly one of these, which keeps the
/// termination policy inspectable in tests and visible in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The accumulator reached `max_results`
    BudgetMet,

    /// The hard page ceiling was reached before the budget
    PageCeiling,

    /// The source returned an empty page or reported its last page
    SourceExhausted,

    /// A page fetch failed or timed out
    FetchFailed,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetMet => "budget_met",
            Self::PageCeiling => "page_ceiling",
            Self::SourceExhausted => "source_exhausted",
            Self::FetchFailed => "fetch_failed",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
