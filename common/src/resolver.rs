//! Match resolution
//!
//! Picks at most one catalog candidate for a noisy record.
//!
//! ## Flow
//! 1. Search by title (+ year); retry once without the year on zero hits
//! 2. Scan the top candidates in catalog ranking order
//!    - director known: the first candidate whose directors share a name token wins
//!      (the year is not rechecked)
//!    - director unknown: the first candidate within the year tolerance wins
//! 3. Nothing matched: director known means unmatched, otherwise fall back to
//!    the top candidate (subject to [`DirectorlessFallback`])
//!
//! Collaborator failures never abort a resolution; they count as empty results.

use crate::director::{directors_match, directors_of};
use crate::error::Result;
use crate::policy::{DirectorlessFallback, MatchPolicy};
use crate::types::{Candidate, CatalogId, CrewMember, MatchBasis, MatchResult, MovieRecord};
use crate::year::year_matches_with;
use tracing::{debug, warn};

/// External movie catalog, split into search and crew lookup so crew is only
/// fetched when a director has to be confirmed.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Ranked search results for a title, optionally restricted to a year
    async fn search_candidates(&self, query: &str, year: Option<i32>) -> Result<Vec<Candidate>>;

    /// Crew credits of one candidate
    async fn fetch_crew(&self, id: CatalogId) -> Result<Vec<CrewMember>>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    async fn search_candidates(&self, query: &str, year: Option<i32>) -> Result<Vec<Candidate>> {
        (**self).search_candidates(query, year).await
    }

    async fn fetch_crew(&self, id: CatalogId) -> Result<Vec<CrewMember>> {
        (**self).fetch_crew(id).await
    }
}

pub struct MatchResolver<C> {
    catalog: C,
    policy: MatchPolicy,
}

impl<C: CatalogSource> MatchResolver<C> {
    pub fn new(catalog: C, policy: MatchPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Two-tier resolution: original title first, then the localized one.
    pub async fn resolve_record(&self, record: &MovieRecord) -> MatchResult {
        for query in record.title_queries() {
            let result = self
                .resolve(query, record.year, record.director.as_deref())
                .await;
            if result.is_matched() {
                return result;
            }
        }
        MatchResult::Unmatched
    }

    /// Resolves one title query to a single candidate or `Unmatched`.
    pub async fn resolve(
        &self,
        title_query: &str,
        year: Option<i32>,
        director: Option<&str>,
    ) -> MatchResult {
        let title_query = title_query.trim();
        if title_query.is_empty() {
            debug!("empty title, skipping search");
            return MatchResult::Unmatched;
        }
        let director = director.map(str::trim).filter(|d| !d.is_empty());

        debug!(query = title_query, ?year, "searching");
        let mut candidates = self.search(title_query, year).await;

        if candidates.is_empty() && year.is_some() {
            debug!(query = title_query, "no results with year, searching without it");
            candidates = self.search(title_query, None).await;
        }

        if candidates.is_empty() {
            debug!(query = title_query, "no candidates");
            return MatchResult::Unmatched;
        }

        candidates.truncate(self.policy.candidate_limit());
        debug!(query = title_query, count = candidates.len(), "scanning candidates");

        for candidate in &candidates {
            match director {
                Some(target) => {
                    let crew = self.crew(candidate.id).await;
                    if directors_match(&directors_of(&crew), Some(target)) {
                        debug!(id = candidate.id, title = %candidate.title, "director confirmed");
                        return MatchResult::matched(candidate, MatchBasis::Director);
                    }
                }
                None => {
                    if year_matches_with(candidate.release_date.as_deref(), year, &self.policy) {
                        debug!(id = candidate.id, title = %candidate.title, "year accepted");
                        return MatchResult::matched(candidate, MatchBasis::Year);
                    }
                }
            }
        }

        if director.is_some() {
            debug!(query = title_query, "director not confirmed by any candidate");
            return MatchResult::Unmatched;
        }

        match self.policy.without_director {
            DirectorlessFallback::FirstCandidate => {
                let first = &candidates[0];
                debug!(id = first.id, title = %first.title, "falling back to top candidate");
                MatchResult::matched(first, MatchBasis::Fallback)
            }
            DirectorlessFallback::Unmatched => MatchResult::Unmatched,
        }
    }

    async fn search(&self, query: &str, year: Option<i32>) -> Vec<Candidate> {
        self.catalog
            .search_candidates(query, year)
            .await
            .unwrap_or_else(|e| {
                warn!(query, ?year, error = %e, "search failed, treating as no results");
                Vec::new()
            })
    }

    async fn crew(&self, id: CatalogId) -> Vec<CrewMember> {
        self.catalog.fetch_crew(id).await.unwrap_or_else(|e| {
            warn!(id, error = %e, "crew lookup failed, treating as no crew");
            Vec::new()
        })
    }
}
