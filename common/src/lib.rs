//! Movie Match Common Library
//!
//! Match resolution core shared by the CLI: text normalization, director and
//! year checks, and the resolver that picks one catalog entry per record.

pub mod types;
pub mod text;
pub mod director;
pub mod year;
pub mod policy;
pub mod resolver;
pub mod error;

pub use types::{Candidate, CatalogId, CrewMember, MatchBasis, MatchResult, MovieRecord};
pub use text::normalize;
pub use director::{directors_match, directors_of};
pub use year::{parse_year_prefix, year_matches, year_matches_with};
pub use policy::{DirectorlessFallback, MatchPolicy, UnparseableYear};
pub use resolver::{CatalogSource, MatchResolver};
pub use error::{Error, Result};
