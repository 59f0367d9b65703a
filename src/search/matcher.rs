//! Case-insensitive pattern matching
//!
//! A run compiles its pattern once and shares the matcher across titles and
//! comments. Compilation failures are configuration errors.

use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// Upper bound on the compiled program size of a user-supplied pattern
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Outcome of testing one piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    /// The first matched substring, as it appears in the text
    Matched(String),
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// A compiled, case-insensitive regular expression
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compiles `pattern`
    ///
    /// # Returns
    ///
    /// * `Ok(PatternMatcher)` - The pattern compiled
    /// * `Err(ConfigError::InvalidPattern)` - The pattern is not a valid regular expression
    ///
    /// # Example
    ///
    /// ```
    /// use hn_scout::search::{MatchResult, PatternMatcher};
    ///
    /// let matcher = PatternMatcher::new("robot").unwrap();
    /// assert_eq!(matcher.test("Robots!"), MatchResult::Matched("Robot".to_string()));
    /// assert_eq!(matcher.test("drones"), MatchResult::NoMatch);
    /// ```
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;

        Ok(Self { regex })
    }

    /// Tests `text`, returning the first matched substring
    pub fn test(&self, text: &str) -> MatchResult {
        match self.regex.find(text) {
            Some(found) => MatchResult::Matched(found.as_str().to_string()),
            None => MatchResult::NoMatch,
        }
    }

    /// The source pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
