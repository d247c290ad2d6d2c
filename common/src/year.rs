//! Release year comparison with a fixed tolerance

use crate::policy::{MatchPolicy, UnparseableYear};

/// Year prefix of a catalog date ("2023-05-01" -> 2023)
pub fn parse_year_prefix(date: &str) -> Option<i32> {
    date.split('-').next()?.trim().parse().ok()
}

/// Year check under the default policy (tolerance 2, fail-open).
pub fn year_matches(candidate_date: Option<&str>, target_year: Option<i32>) -> bool {
    year_matches_with(candidate_date, target_year, &MatchPolicy::default())
}

/// Year check under `policy`.
///
/// An absent (or blank) date or an absent year is never an objection.
pub fn year_matches_with(
    candidate_date: Option<&str>,
    target_year: Option<i32>,
    policy: &MatchPolicy,
) -> bool {
    let (Some(date), Some(target)) = (candidate_date, target_year) else {
        return true;
    };
    if date.trim().is_empty() {
        return true;
    }

    match parse_year_prefix(date) {
        Some(year) => year.abs_diff(target) <= policy.year_tolerance.max(0).unsigned_abs(),
        None => policy.unparseable_year == UnparseableYear::Accept,
    }
}
