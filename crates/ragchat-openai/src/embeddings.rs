//! OpenAI embeddings client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ragchat_core::{EmbeddingModel, Error, Result};

use crate::config::OpenAiConfig;

/// OpenAI embeddings client
pub struct OpenAiEmbeddings {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

impl OpenAiEmbeddings {
    /// Create a new embeddings client from configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new embeddings client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAiConfig::from_env()?;
        Self::new(config)
    }

    fn extract_vector(response: EmbeddingResponse) -> Result<Vec<f32>> {
        response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| {
                Error::EmbeddingModel("Empty embedding response from OpenAI API".to_string())
            })
    }
}

#[async_trait]
impl EmbeddingModel for OpenAiEmbeddings {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let request_body = EmbeddingRequest {
            model: &self.config.embedding_model,
            input: text,
        };

        let url = format!("{}/v1/embeddings", self.config.api_url);

        tracing::debug!(model = %self.config.embedding_model, "embedding query");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::EmbeddingModel(format!(
                "OpenAI embeddings request failed with status {}: {}",
                status, error_text
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Self::extract_vector(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_vector() {
        let response = EmbeddingResponse {
            data: vec![EmbeddingData {
                embedding: vec![0.1, 0.2, 0.3],
            }],
        };
        let vector = OpenAiEmbeddings::extract_vector(response).unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_extract_vector_empty() {
        let response = EmbeddingResponse { data: vec![] };
        let err = OpenAiEmbeddings::extract_vector(response).unwrap_err();
        assert!(matches!(err, Error::EmbeddingModel(_)));
    }

    #[test]
    fn test_embedding_request_shape() {
        let request = EmbeddingRequest {
            model: "text-embedding-ada-002",
            input: "What is compound interest?",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "text-embedding-ada-002");
        assert_eq!(json["input"], "What is compound interest?");
    }
}
