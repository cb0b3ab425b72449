//! Qdrant adapter and search client
//!
//! Embeds the question together with the rendered history, queries a fixed
//! collection on a live Qdrant instance, and newline-joins the
//! `page_content` payload fields of the returned points.

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::SearchPointsBuilder;
use qdrant_client::qdrant::value::Kind;

use ragchat_core::{
    ChatModel, ChatTurn, CollectionSearch, EmbeddingModel, Error, Result, RetrievedDocument,
    format_history, prompt, question_with_history,
};

use super::join_contents;

/// Collection holding the indexed text vectors
pub const TEXT_VECTORS_COLLECTION: &str = "text_vectors";

pub async fn answer(
    chat_model: &dyn ChatModel,
    model_id: &str,
    question: &str,
    embedder: Option<&dyn EmbeddingModel>,
    client: &dyn CollectionSearch,
    history: &[ChatTurn],
    collection: &str,
    limit: u64,
) -> Result<String> {
    let embedder = embedder.ok_or_else(|| {
        Error::EmbeddingModel("Embedding model is not initialized".to_string())
    })?;

    let query = question_with_history(question, history);
    let query_embedding = embedder.embed_query(&query).await?;

    let documents = client
        .search_collection(collection, query_embedding, limit)
        .await?;
    let context = join_contents(&documents);

    let prompt = prompt::assistant_prompt(&format_history(history), &context, question);
    chat_model.complete(model_id, &prompt).await
}

/// Search client backed by a live Qdrant instance
pub struct QdrantSearch {
    client: Qdrant,
}

impl QdrantSearch {
    /// Connect to a Qdrant instance by URL
    pub fn new(url: &str) -> Result<Self> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| Error::Retrieval(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CollectionSearch for QdrantSearch {
    async fn search_collection(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<RetrievedDocument>> {
        let request = SearchPointsBuilder::new(collection, vector, limit).with_payload(true);

        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| Error::Retrieval(e.to_string()))?;

        let documents = response
            .result
            .into_iter()
            .map(|point| {
                let content = point
                    .payload
                    .get("page_content")
                    .and_then(|value| match &value.kind {
                        Some(Kind::StringValue(s)) => Some(s.clone()),
                        _ => None,
                    })
                    .unwrap_or_default();

                RetrievedDocument {
                    content,
                    score: Some(point.score),
                    metadata: serde_json::Value::Null,
                }
            })
            .collect();

        Ok(documents)
    }
}
