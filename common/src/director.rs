//! Director name matching
//!
//! A candidate director matches when its normalized name shares at least one
//! whitespace token with the target, so "Del Toro" matches "Guillermo del Toro".

use crate::text::tokens;
use crate::types::CrewMember;

/// True when any candidate director shares a token with `target`.
///
/// Returns false when `target` is absent or blank, or when there are no
/// candidate directors.
pub fn directors_match<S: AsRef<str>>(candidate_directors: &[S], target: Option<&str>) -> bool {
    let Some(target) = target else {
        return false;
    };
    let target_tokens = tokens(target);
    if target_tokens.is_empty() {
        return false;
    }

    candidate_directors
        .iter()
        .any(|name| !tokens(name.as_ref()).is_disjoint(&target_tokens))
}

/// Names of the crew members credited as "Director", in credit order
pub fn directors_of(crew: &[CrewMember]) -> Vec<&str> {
    crew.iter()
        .filter(|member| member.is_director())
        .map(|member| member.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surname_matches_full_name() {
        assert!(directors_match(&["Guillermo del Toro"], Some("Del Toro")));
    }

    #[test]
    fn test_different_director() {
        assert!(!directors_match(&["Christopher Nolan"], Some("Del Toro")));
    }

    #[test]
    fn test_empty_sides() {
        let none: [&str; 0] = [];
        assert!(!directors_match(&none, Some("Del Toro")));
        assert!(!directors_match(&["Any"], None));
        assert!(!directors_match(&["Any"], Some("  ")));
    }

    #[test]
    fn test_accent_insensitive() {
        assert!(directors_match(&["Pedro Almodóvar"], Some("almodovar")));
    }

    #[test]
    fn test_any_of_several_directors() {
        let names = vec!["Joel Coen".to_string(), "Ethan Coen".to_string()];
        assert!(directors_match(&names, Some("Ethan")));
    }

    #[test]
    fn test_directors_of_filters_job() {
        let crew = vec![
            CrewMember { name: "Jarin Blaschke".into(), job: "Director of Photography".into() },
            CrewMember::director("Robert Eggers"),
            CrewMember { name: "Robert Eggers".into(), job: "Screenplay".into() },
        ];
        assert_eq!(directors_of(&crew), vec!["Robert Eggers"]);
    }
}
