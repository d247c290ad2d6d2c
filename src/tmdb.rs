//! TMDB catalog client
//!
//! Search (`/search/movie`) and credits (`/movie/{id}/credits`) lookups used by
//! the resolver. Every failure is returned as `Error::Catalog`; deciding what a
//! failure means is up to the resolver.

use crate::config::Config;
use crate::error::Result;
use movie_match_common::{Candidate, CatalogId, CatalogSource, CrewMember};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: CatalogId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    crew: Vec<CrewEntry>,
}

#[derive(Debug, Deserialize)]
struct CrewEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    job: String,
}

impl From<SearchHit> for Candidate {
    fn from(hit: SearchHit) -> Self {
        // TMDB sends "" for unknown dates
        let release_date = hit.release_date.filter(|d| !d.trim().is_empty());
        Candidate {
            id: hit.id,
            title: hit.title,
            release_date,
        }
    }
}

impl From<CrewEntry> for CrewMember {
    fn from(entry: CrewEntry) -> Self {
        CrewMember {
            name: entry.name,
            job: entry.job,
        }
    }
}

pub struct TmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: language.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.tmdb_api_key()?,
            config.tmdb_base_url.as_str(),
            config.language.as_str(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn search_url(&self) -> String {
        format!("{}/search/movie", self.base_url)
    }

    fn credits_url(&self, id: CatalogId) -> String {
        format!("{}/movie/{}/credits", self.base_url, id)
    }

    fn search_params(&self, query: &str, year: Option<i32>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("query", query.to_string()),
            ("language", self.language.clone()),
        ];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> movie_match_common::Result<T> {
        let res = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(catalog_error)?;
        res.error_for_status()
            .map_err(catalog_error)?
            .json::<T>()
            .await
            .map_err(catalog_error)
    }
}

/// Drops the URL from the message, it carries the API key.
fn catalog_error(e: reqwest::Error) -> movie_match_common::Error {
    movie_match_common::Error::Catalog(e.without_url().to_string())
}

fn into_candidates(response: SearchResponse) -> Vec<Candidate> {
    response.results.into_iter().map(Candidate::from).collect()
}

fn into_crew(response: CreditsResponse) -> Vec<CrewMember> {
    response.crew.into_iter().map(CrewMember::from).collect()
}

impl CatalogSource for TmdbClient {
    async fn search_candidates(
        &self,
        query: &str,
        year: Option<i32>,
    ) -> movie_match_common::Result<Vec<Candidate>> {
        debug!(query, ?year, "tmdb search");
        let params = self.search_params(query, year);
        let response: SearchResponse = self.get_json(&self.search_url(), &params).await?;
        Ok(into_candidates(response))
    }

    async fn fetch_crew(&self, id: CatalogId) -> movie_match_common::Result<Vec<CrewMember>> {
        debug!(id, "tmdb credits");
        let params = [("api_key", self.api_key.clone())];
        let response: CreditsResponse = self.get_json(&self.credits_url(id), &params).await?;
        Ok(into_crew(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client() -> TmdbClient {
        TmdbClient::new("secret", "https://api.example.org/3/", "pt-BR", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_urls() {
        let client = client();
        assert_eq!(client.search_url(), "https://api.example.org/3/search/movie");
        assert_eq!(client.credits_url(426063), "https://api.example.org/3/movie/426063/credits");
    }

    #[test]
    fn test_search_params_year_only_when_present() {
        let client = client();
        let params = client.search_params("Nosferatu", Some(2024));
        assert!(params.contains(&("year", "2024".to_string())));
        assert!(params.contains(&("language", "pt-BR".to_string())));

        let params = client.search_params("Nosferatu", None);
        assert!(params.iter().all(|(k, _)| *k != "year"));
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 426063, "title": "Nosferatu", "release_date": "2024-12-25", "poster_path": null},
                {"id": 653, "title": "Nosferatu", "release_date": ""},
                {"id": 99, "title": "Sem data"}
            ],
            "total_results": 3
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let candidates = into_candidates(response);

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].id, 426063);
        assert_eq!(candidates[0].release_date.as_deref(), Some("2024-12-25"));
        assert_eq!(candidates[1].release_date, None);
        assert_eq!(candidates[2].release_date, None);
    }

    #[test]
    fn test_parse_error_body_as_empty() {
        let json = r#"{"status_code": 7, "status_message": "Invalid API key"}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(into_candidates(response).is_empty());
    }

    #[test]
    fn test_parse_credits_response() {
        let json = r#"{
            "id": 426063,
            "cast": [{"name": "Lily-Rose Depp"}],
            "crew": [
                {"name": "Robert Eggers", "job": "Director", "department": "Directing"},
                {"name": "Jarin Blaschke", "job": "Director of Photography"}
            ]
        }"#;
        let response: CreditsResponse = serde_json::from_str(json).unwrap();
        let crew = into_crew(response);

        assert_eq!(movie_match_common::directors_of(&crew), vec!["Robert Eggers"]);
    }

    fn mock_client(server: &MockServer) -> TmdbClient {
        TmdbClient::new("secret", server.base_url(), "pt-BR", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_query_params() {
        let server = MockServer::start_async().await;
        let search = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search/movie")
                    .query_param("api_key", "secret")
                    .query_param("query", "A Forma da Água")
                    .query_param("language", "pt-BR")
                    .query_param("year", "2017");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "results": [
                            {"id": 399055, "title": "A Forma da Água", "release_date": "2017-12-01"}
                        ]
                    }));
            })
            .await;

        let candidates = mock_client(&server)
            .search_candidates("A Forma da Água", Some(2017))
            .await
            .unwrap();

        search.assert_async().await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, 399055);
        assert_eq!(candidates[0].release_date.as_deref(), Some("2017-12-01"));
    }

    #[tokio::test]
    async fn test_search_without_year_omits_param() {
        let server = MockServer::start_async().await;
        let search = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search/movie")
                    .query_param("query", "Nosferatu")
                    .query_param_missing("year");
                then.status(200).json_body(serde_json::json!({"results": []}));
            })
            .await;

        let candidates = mock_client(&server).search_candidates("Nosferatu", None).await.unwrap();

        search.assert_async().await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_search_unauthorized_is_catalog_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search/movie");
                then.status(401).json_body(serde_json::json!({
                    "status_code": 7,
                    "status_message": "Invalid API key"
                }));
            })
            .await;

        let err = mock_client(&server)
            .search_candidates("Nosferatu", Some(2024))
            .await
            .unwrap_err();

        assert!(matches!(err, movie_match_common::Error::Catalog(_)));
        assert!(!err.to_string().contains("secret"), "key leaked: {}", err);
    }

    #[tokio::test]
    async fn test_credits_malformed_body_is_catalog_error() {
        let server = MockServer::start_async().await;
        let credits = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/movie/426063/credits")
                    .query_param("api_key", "secret");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{\"crew\": [");
            })
            .await;

        let err = mock_client(&server).fetch_crew(426063).await.unwrap_err();

        credits.assert_async().await;
        assert!(matches!(err, movie_match_common::Error::Catalog(_)));
    }

    #[tokio::test]
    async fn test_credits_directors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/movie/426063/credits");
                then.status(200).json_body(serde_json::json!({
                    "id": 426063,
                    "crew": [
                        {"name": "Robert Eggers", "job": "Director"},
                        {"name": "Jarin Blaschke", "job": "Director of Photography"}
                    ]
                }));
            })
            .await;

        let crew = mock_client(&server).fetch_crew(426063).await.unwrap();
        assert_eq!(movie_match_common::directors_of(&crew), vec!["Robert Eggers"]);
    }
}
