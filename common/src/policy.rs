//! Resolution policy
//!
//! Everything the resolver would otherwise read from global constants.

use serde::{Deserialize, Serialize};

/// What to do when a candidate's release date cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnparseableYear {
    /// Treat as "no objection"
    #[default]
    Accept,
    Reject,
}

/// Outcome when no director is known and no candidate passes the year check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectorlessFallback {
    /// Take the top-ranked candidate
    #[default]
    FirstCandidate,
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Maximum accepted distance in years
    pub year_tolerance: i32,
    /// How many search results are scanned
    pub max_candidates: usize,
    pub unparseable_year: UnparseableYear,
    pub without_director: DirectorlessFallback,
}

impl MatchPolicy {
    pub const DEFAULT_YEAR_TOLERANCE: i32 = 2;
    pub const DEFAULT_MAX_CANDIDATES: usize = 5;

    /// Rejects unparseable dates and never guesses the first candidate.
    pub fn strict() -> Self {
        Self {
            unparseable_year: UnparseableYear::Reject,
            without_director: DirectorlessFallback::Unmatched,
            ..Default::default()
        }
    }

    /// Number of candidates to scan; at least one.
    pub fn candidate_limit(&self) -> usize {
        self.max_candidates.max(1)
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            year_tolerance: Self::DEFAULT_YEAR_TOLERANCE,
            max_candidates: Self::DEFAULT_MAX_CANDIDATES,
            unparseable_year: UnparseableYear::default(),
            without_director: DirectorlessFallback::default(),
        }
    }
}
