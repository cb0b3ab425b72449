//! FAISS adapter: similarity index plus docstore lookup
//!
//! Embeds the question, runs a nearest-neighbour search against the
//! pre-built index, and resolves the top hit's numeric id through the
//! docstore. Only that document's text becomes the context.

use std::collections::HashMap;

use async_trait::async_trait;

use ragchat_core::{
    ChatModel, ChatTurn, Docstore, EmbeddingModel, Error, Result, RetrievedDocument,
    SimilarityIndex, format_history, prompt,
};

pub async fn answer(
    chat_model: &dyn ChatModel,
    model_id: &str,
    question: &str,
    embedder: Option<&dyn EmbeddingModel>,
    index: &dyn SimilarityIndex,
    docstore: &dyn Docstore,
    history: &[ChatTurn],
    top_k: usize,
) -> Result<String> {
    let embedder = embedder.ok_or_else(|| {
        Error::EmbeddingModel("Embedding model is not initialized".to_string())
    })?;

    let query_embedding = embedder.embed_query(question).await?;
    let hits = index.search(&query_embedding, top_k).await?;
    let hit = hits
        .first()
        .ok_or_else(|| Error::Retrieval("Similarity index returned no results".to_string()))?;

    let document = docstore.lookup(hit.doc_id).await?;

    let prompt =
        prompt::financial_advisor_prompt(&format_history(history), &document.content, question);
    chat_model.complete(model_id, &prompt).await
}

/// In-memory docstore keyed by numeric document id
///
/// The production docstore is produced by the preprocessing pipeline; this
/// implementation backs local runs and tests.
#[derive(Default)]
pub struct MemoryDocstore {
    documents: HashMap<i64, RetrievedDocument>,
}

impl MemoryDocstore {
    /// Create an empty docstore
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document under the given id
    pub fn insert(&mut self, doc_id: i64, document: RetrievedDocument) {
        self.documents.insert(doc_id, document);
    }
}

#[async_trait]
impl Docstore for MemoryDocstore {
    async fn lookup(&self, doc_id: i64) -> Result<RetrievedDocument> {
        self.documents.get(&doc_id).cloned().ok_or_else(|| {
            Error::Retrieval(format!("Document {} not found in docstore", doc_id))
        })
    }
}
