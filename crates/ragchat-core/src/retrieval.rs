//! Retrieval backend traits and document types
//!
//! Each of the five supported vector backends speaks a different protocol.
//! These traits capture the protocols as the inference core consumes them;
//! concrete clients live in the `ragchat-inference` crate, and tests use
//! in-process stubs.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A document retrieved from a backend, used as query context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    pub score: Option<f32>,
    pub metadata: serde_json::Value,
}

impl RetrievedDocument {
    /// Create a document carrying only content
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            score: None,
            metadata: serde_json::Value::Null,
        }
    }
}

/// A hit from a similarity index: numeric document id plus distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexHit {
    pub doc_id: i64,
    pub distance: f32,
}

/// Chain-style retriever (Chroma)
///
/// The retriever embeds the query itself and decides how many documents to
/// return; the caller never configures k.
#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    /// Retrieve documents relevant to the query
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>>;
}

/// Nearest-neighbour index queried by embedding vector (FAISS)
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Search for the k nearest neighbours of the given vector
    async fn search(&self, vector: &[f32], k: usize) -> Result<Vec<IndexHit>>;
}

/// Document store keyed by the numeric ids a similarity index returns
#[async_trait]
pub trait Docstore: Send + Sync {
    /// Look up the document behind an index hit
    async fn lookup(&self, doc_id: i64) -> Result<RetrievedDocument>;
}

/// Live search client scoped to named collections (Qdrant)
#[async_trait]
pub trait CollectionSearch: Send + Sync {
    /// Run a top-`limit` similarity query against one collection
    async fn search_collection(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<RetrievedDocument>>;
}

/// Hosted index queried by vector, returning metadata payloads (Pinecone)
#[async_trait]
pub trait MetadataIndex: Send + Sync {
    /// Run a top-k similarity query with metadata included
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedDocument>>;
}

/// Vector store that exposes itself as a retriever (Weaviate)
pub trait RetrieverFactory: Send + Sync {
    /// Produce a retriever bound to this store
    fn as_retriever(&self) -> Arc<dyn DocumentRetriever>;
}
