//! Embedding model trait

use async_trait::async_trait;

use crate::Result;

/// Trait for query embedding models (e.g., OpenAI embeddings)
///
/// The produced vector is used only as a query key into similarity search
/// and is never mutated after creation.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed a query string into a fixed-length vector
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}
