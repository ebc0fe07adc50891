//! Embedding service client.
//!
//! The pipeline only needs one operation from the outside world:
//! text in, vector out. The [`Embedder`] trait captures that seam
//! so tests can substitute a stub, and [`TitanEmbedder`] is the
//! production implementation speaking the Bedrock `InvokeModel`
//! wire shape for Titan embedding models.
//!
//! The client performs no retries. A failed call fails exactly
//! one chunk; retry policy, if any, belongs to the operator
//! re-running the ingestion.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::core::error::{IngestError, Result};

/// Default request timeout for a single embedding call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Text-to-vector client interface
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one chunk of text.
    ///
    /// Any transport, status, or decode failure surfaces as
    /// [`IngestError::Embedding`]; callers do not distinguish
    /// sub-kinds.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// HTTP client for Titan-family embedding models.
#[derive(Debug, Clone)]
pub struct TitanEmbedder {
    client: reqwest::Client,
    invoke_url: String,
}

impl TitanEmbedder {
    /// Build a client for the given model behind the given
    /// runtime endpoint.
    ///
    /// `api_key` is sent as a bearer token when present;
    /// deployments fronted by an authenticating proxy may omit
    /// it.
    pub fn new(endpoint: &str, model_id: &str, api_key: Option<&str>) -> Result<Self> {
        if model_id.trim().is_empty() {
            return Err(IngestError::Config(
                "embedding model identifier must not be empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let auth = format!("Bearer {}", key.trim());
            let value = HeaderValue::from_str(&auth)
                .map_err(|_| IngestError::Config("invalid embedding API key".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                IngestError::Config(format!("failed to build embedding HTTP client: {e}"))
            })?;

        let invoke_url = format!(
            "{}/model/{}/invoke",
            endpoint.trim_end_matches('/'),
            model_id
        );

        Ok(Self { client, invoke_url })
    }

    /// Default runtime endpoint for a region.
    pub fn endpoint_for_region(region: &str) -> String {
        format!("https://bedrock-runtime.{region}.amazonaws.com")
    }
}

#[async_trait]
impl Embedder for TitanEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = InvokeRequest { input_text: text };

        let response = self
            .client
            .post(&self.invoke_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| IngestError::Embedding(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(IngestError::Embedding(format!(
                "service returned {status}: {body}"
            )));
        }

        let parsed: InvokeResponse = response
            .json()
            .await
            .map_err(|e| IngestError::Embedding(format!("malformed response: {e}")))?;

        Ok(parsed.embedding)
    }
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
}

/// Titan responses also carry `inputTextTokenCount`; only the
/// vector is used here.
#[derive(Debug, Deserialize)]
struct InvokeResponse {
    embedding: Vec<f32>,
}
