use serde::{Deserialize, Serialize};

/// Catalog-side movie identifier
pub type CatalogId = u64;

/// One curated list entry, as read from the source spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    /// Localized title (always present for an ingested row)
    pub title_primary: String,

    #[serde(default)]
    pub title_original: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub director: Option<String>,
}

impl MovieRecord {
    pub fn new(title_primary: impl Into<String>) -> Self {
        Self {
            title_primary: title_primary.into(),
            ..Default::default()
        }
    }

    pub fn with_original(mut self, title: impl Into<String>) -> Self {
        self.title_original = Some(title.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// Titles to try, in order: original first, then localized.
    pub fn title_queries(&self) -> Vec<&str> {
        let mut queries = Vec::with_capacity(2);
        if let Some(original) = self.title_original.as_deref() {
            if !original.trim().is_empty() {
                queries.push(original);
            }
        }
        // same title twice would repeat an identical resolution
        if queries.iter().all(|q| q.trim() != self.title_primary.trim()) {
            queries.push(self.title_primary.as_str());
        }
        queries
    }
}

/// One search hit under evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CatalogId,

    #[serde(default)]
    pub title: String,

    /// "YYYY-MM-DD" or a partial date
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Crew credit of a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
}

impl CrewMember {
    pub fn director(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: "Director".into(),
        }
    }

    pub fn is_director(&self) -> bool {
        self.job == "Director"
    }
}

/// Which rule selected the matched candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBasis {
    Director,
    Year,
    Fallback,
}

impl std::fmt::Display for MatchBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchBasis::Director => write!(f, "director"),
            MatchBasis::Year => write!(f, "year"),
            MatchBasis::Fallback => write!(f, "fallback"),
        }
    }
}

/// Terminal verdict for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    Matched {
        candidate_id: CatalogId,
        candidate_title: String,
        basis: MatchBasis,
    },
    Unmatched,
}

impl MatchResult {
    pub fn matched(candidate: &Candidate, basis: MatchBasis) -> Self {
        MatchResult::Matched {
            candidate_id: candidate.id,
            candidate_title: candidate.title.clone(),
            basis,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn candidate_id(&self) -> Option<CatalogId> {
        match self {
            MatchResult::Matched { candidate_id, .. } => Some(*candidate_id),
            MatchResult::Unmatched => None,
        }
    }
}
