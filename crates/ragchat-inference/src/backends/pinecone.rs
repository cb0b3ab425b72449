//! Pinecone adapter and REST query client
//!
//! Embeds the question, queries the hosted index with metadata included,
//! and newline-joins the `text` metadata fields of the returned matches.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ragchat_core::{
    ChatModel, ChatTurn, EmbeddingModel, Error, MetadataIndex, Result, RetrievedDocument,
    format_history, prompt,
};

use super::join_contents;

pub async fn answer(
    chat_model: &dyn ChatModel,
    model_id: &str,
    question: &str,
    embedder: Option<&dyn EmbeddingModel>,
    index: &dyn MetadataIndex,
    history: &[ChatTurn],
    top_k: usize,
) -> Result<String> {
    let embedder = embedder.ok_or_else(|| {
        Error::EmbeddingModel("Embedding model is not initialized".to_string())
    })?;

    let query_embedding = embedder.embed_query(question).await?;
    let matches = index.query(query_embedding, top_k).await?;
    let context = join_contents(&matches);

    let prompt = prompt::assistant_prompt(&format_history(history), &context, question);
    chat_model.complete(model_id, &prompt).await
}

/// Query client for a hosted Pinecone index
pub struct PineconeIndex {
    api_key: String,
    index_url: String,
    client: Client,
}

#[derive(Serialize)]
struct QueryRequest {
    vector: Vec<f32>,
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryMatch {
    score: Option<f32>,
    #[serde(default)]
    metadata: serde_json::Value,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

impl PineconeIndex {
    /// Create a client for the index reachable at `index_url`
    pub fn new(api_key: impl Into<String>, index_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            index_url: index_url.into(),
            client,
        })
    }

    fn matches_to_documents(response: QueryResponse) -> Vec<RetrievedDocument> {
        response
            .matches
            .into_iter()
            .map(|m| {
                let content = m
                    .metadata
                    .get("text")
                    .and_then(|value| value.as_str())
                    .unwrap_or_default()
                    .to_string();
                RetrievedDocument {
                    content,
                    score: m.score,
                    metadata: m.metadata,
                }
            })
            .collect()
    }
}

#[async_trait]
impl MetadataIndex for PineconeIndex {
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let request_body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let url = format!("{}/query", self.index_url);

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
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
            return Err(Error::Retrieval(format!(
                "Pinecone query failed with status {}: {}",
                status, error_text
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Ok(Self::matches_to_documents(parsed))
    }
}
