//! Destination store for matched reviews

use crate::config::Config;
use crate::error::Result;
use movie_match_common::CatalogId;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

/// Row written for every matched entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewPayload {
    pub tmdb_id: CatalogId,
    pub rating: f64,
    pub review: String,
    pub recommended: String,
}

#[allow(async_fn_in_trait)]
pub trait RecordSink {
    async fn save(&self, payload: &ReviewPayload) -> Result<()>;
}

/// Supabase REST (PostgREST) table insert
pub struct SupabaseSink {
    http: Client,
    endpoint: String,
    key: String,
}

impl SupabaseSink {
    pub fn new(url: &str, key: &str, table: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/rest/v1/{}", url.trim_end_matches('/'), table),
            key: key.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let (url, key) = config.supabase_credentials()?;
        Self::new(
            url,
            key,
            &config.supabase_table,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RecordSink for SupabaseSink {
    async fn save(&self, payload: &ReviewPayload) -> Result<()> {
        self.http
            .post(&self.endpoint)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Logs payloads instead of writing them
pub struct DryRunSink;

impl RecordSink for DryRunSink {
    async fn save(&self, payload: &ReviewPayload) -> Result<()> {
        info!(tmdb_id = payload.tmdb_id, rating = payload.rating, "dry run, not written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MovieMatchError;
    use httpmock::prelude::*;

    #[test]
    fn test_endpoint() {
        let sink = SupabaseSink::new("https://abc.supabase.co/", "key", "reviews", Duration::from_secs(5)).unwrap();
        assert_eq!(sink.endpoint(), "https://abc.supabase.co/rest/v1/reviews");
    }

    #[test]
    fn test_payload_field_names() {
        let payload = ReviewPayload {
            tmdb_id: 496243,
            rating: 9.5,
            review: "Obra-prima".into(),
            recommended: "Sim".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tmdb_id"], 496243);
        assert_eq!(json["rating"], 9.5);
        assert_eq!(json["review"], "Obra-prima");
        assert_eq!(json["recommended"], "Sim");
    }

    fn payload() -> ReviewPayload {
        ReviewPayload {
            tmdb_id: 426063,
            rating: 8.5,
            review: "Atmosférico".into(),
            recommended: "Sim".into(),
        }
    }

    #[tokio::test]
    async fn test_save_posts_row_with_headers() {
        let server = MockServer::start_async().await;
        let insert = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/reviews")
                    .header("apikey", "service-key")
                    .header("authorization", "Bearer service-key")
                    .header("prefer", "return=minimal")
                    .json_body(serde_json::json!({
                        "tmdb_id": 426063,
                        "rating": 8.5,
                        "review": "Atmosférico",
                        "recommended": "Sim"
                    }));
                then.status(201);
            })
            .await;

        let sink = SupabaseSink::new(&server.base_url(), "service-key", "reviews", Duration::from_secs(5)).unwrap();
        sink.save(&payload()).await.unwrap();

        insert.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_rejected_is_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/reviews");
                then.status(409).json_body(serde_json::json!({"message": "duplicate key"}));
            })
            .await;

        let sink = SupabaseSink::new(&server.base_url(), "service-key", "reviews", Duration::from_secs(5)).unwrap();
        let err = sink.save(&payload()).await.unwrap_err();

        assert!(matches!(err, MovieMatchError::Http(_)));
    }

    #[tokio::test]
    async fn test_dry_run_sink_accepts_everything() {
        assert!(DryRunSink.save(&payload()).await.is_ok());
    }
}
