use crate::error::{MovieMatchError, Result};
use movie_match_common::{DirectorlessFallback, MatchPolicy, UnparseableYear};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    /// Search result language
    pub language: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub supabase_table: String,
    pub timeout_seconds: u64,
    /// Sheet names containing one of these are preferred
    pub sheet_hints: Vec<String>,
    pub policy: MatchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.into(),
            language: "pt-BR".into(),
            supabase_url: None,
            supabase_key: None,
            supabase_table: "reviews".into(),
            timeout_seconds: 30,
            sheet_hints: vec!["ju".into(), "joão".into()],
            policy: MatchPolicy::default(),
        }
    }
}

impl Config {
    /// Loads the config file (or defaults) and applies environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MovieMatchError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("movie-match").join("config.json"))
    }

    /// Environment wins over the file. `VITE_TMDB_API_KEY` is accepted for
    /// .env files shared with the frontend.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("TMDB_API_KEY").or_else(|| non_empty("VITE_TMDB_API_KEY")) {
            self.tmdb_api_key = Some(key);
        }
        if let Some(url) = non_empty("SUPABASE_URL") {
            self.supabase_url = Some(url);
        }
        if let Some(key) = non_empty("SUPABASE_KEY") {
            self.supabase_key = Some(key);
        }
    }

    pub fn tmdb_api_key(&self) -> Result<&str> {
        self.tmdb_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(MovieMatchError::MissingTmdbKey)
    }

    pub fn supabase_credentials(&self) -> Result<(&str, &str)> {
        match (self.supabase_url.as_deref(), self.supabase_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Ok((url, key)),
            _ => Err(MovieMatchError::MissingSupabaseCredentials),
        }
    }

    /// Configured policy, with the strict switches applied on top when asked.
    pub fn match_policy(&self, strict: bool) -> MatchPolicy {
        let mut policy = self.policy.clone();
        if strict {
            policy.unparseable_year = UnparseableYear::Reject;
            policy.without_director = DirectorlessFallback::Unmatched;
        }
        policy
    }

    pub fn set_tmdb_api_key(&mut self, key: String) -> Result<()> {
        self.tmdb_api_key = Some(key);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config {
            tmdb_api_key: Some("from-file".into()),
            ..Default::default()
        };
        config.apply_env(env(&[("TMDB_API_KEY", "from-env"), ("SUPABASE_URL", "https://x.supabase.co")]));

        assert_eq!(config.tmdb_api_key.as_deref(), Some("from-env"));
        assert_eq!(config.supabase_url.as_deref(), Some("https://x.supabase.co"));
        assert!(config.supabase_key.is_none());
    }

    #[test]
    fn test_vite_key_fallback() {
        let mut config = Config::default();
        config.apply_env(env(&[("VITE_TMDB_API_KEY", "vite"), ("TMDB_API_KEY", "")]));
        assert_eq!(config.tmdb_api_key().unwrap(), "vite");
    }

    #[test]
    fn test_missing_credentials() {
        let config = Config::default();
        assert!(matches!(config.tmdb_api_key(), Err(MovieMatchError::MissingTmdbKey)));
        assert!(matches!(
            config.supabase_credentials(),
            Err(MovieMatchError::MissingSupabaseCredentials)
        ));
    }

    #[test]
    fn test_strict_keeps_configured_tolerance() {
        let mut config = Config::default();
        config.policy.year_tolerance = 1;
        let policy = config.match_policy(true);
        assert_eq!(policy.year_tolerance, 1);
        assert_eq!(policy.unparseable_year, UnparseableYear::Reject);
        assert_eq!(policy.without_director, DirectorlessFallback::Unmatched);
        assert_eq!(config.match_policy(false), config.policy);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"language": "en-US", "policy": {"year_tolerance": 1}}"#).unwrap();
        assert_eq!(config.language, "en-US");
        assert_eq!(config.supabase_table, "reviews");
        assert_eq!(config.policy.year_tolerance, 1);
        assert_eq!(config.policy.max_candidates, 5);
    }
}
