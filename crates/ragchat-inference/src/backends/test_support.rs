//! Shared stub handles for adapter and engine tests

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use ragchat_core::{
    ChatModel, CollectionSearch, DocumentRetriever, EmbeddingModel, IndexHit, MetadataIndex,
    Result, RetrievedDocument, RetrieverFactory, SimilarityIndex,
};

/// Chat model stub that echoes the prompt back and counts invocations
pub struct EchoChatModel {
    calls: AtomicUsize,
}

impl EchoChatModel {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for EchoChatModel {
    async fn complete(&self, _model_id: &str, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(prompt.to_string())
    }
}

/// Retriever stub returning fixed documents
pub struct StubRetriever {
    documents: Vec<RetrievedDocument>,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl StubRetriever {
    pub fn with_documents(contents: Vec<&str>) -> Self {
        Self {
            documents: contents
                .into_iter()
                .map(RetrievedDocument::from_content)
                .collect(),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRetriever for StubRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.to_string());
        Ok(self.documents.clone())
    }
}

/// Embedder stub returning a fixed vector
pub struct StubEmbedder {
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingModel for StubEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        Ok(vec![0.1, 0.2, 0.3])
    }
}

/// Similarity index stub returning fixed document ids
pub struct StubIndex {
    doc_ids: Vec<i64>,
    last_k: Mutex<Option<usize>>,
}

impl StubIndex {
    pub fn returning(doc_ids: Vec<i64>) -> Self {
        Self {
            doc_ids,
            last_k: Mutex::new(None),
        }
    }

    pub fn last_k(&self) -> Option<usize> {
        *self.last_k.lock().unwrap()
    }
}

#[async_trait]
impl SimilarityIndex for StubIndex {
    async fn search(&self, _vector: &[f32], k: usize) -> Result<Vec<IndexHit>> {
        *self.last_k.lock().unwrap() = Some(k);
        Ok(self
            .doc_ids
            .iter()
            .map(|&doc_id| IndexHit {
                doc_id,
                distance: 0.0,
            })
            .collect())
    }
}

/// Collection search stub recording the requested collection and limit
pub struct StubCollectionSearch {
    documents: Vec<RetrievedDocument>,
    last_request: Mutex<Option<(String, u64)>>,
}

impl StubCollectionSearch {
    pub fn with_documents(contents: Vec<&str>) -> Self {
        Self {
            documents: contents
                .into_iter()
                .map(RetrievedDocument::from_content)
                .collect(),
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<(String, u64)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CollectionSearch for StubCollectionSearch {
    async fn search_collection(
        &self,
        collection: &str,
        _vector: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<RetrievedDocument>> {
        *self.last_request.lock().unwrap() = Some((collection.to_string(), limit));
        Ok(self.documents.clone())
    }
}

/// Metadata index stub recording the requested top_k
pub struct StubMetadataIndex {
    documents: Vec<RetrievedDocument>,
    last_top_k: Mutex<Option<usize>>,
}

impl StubMetadataIndex {
    pub fn with_documents(contents: Vec<&str>) -> Self {
        Self {
            documents: contents
                .into_iter()
                .map(RetrievedDocument::from_content)
                .collect(),
            last_top_k: Mutex::new(None),
        }
    }

    pub fn last_top_k(&self) -> Option<usize> {
        *self.last_top_k.lock().unwrap()
    }
}

#[async_trait]
impl MetadataIndex for StubMetadataIndex {
    async fn query(&self, _vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        *self.last_top_k.lock().unwrap() = Some(top_k);
        Ok(self.documents.clone())
    }
}

/// Vector store stub handing out a counting retriever
pub struct StubVectorStore {
    retriever: Arc<StubRetriever>,
}

impl StubVectorStore {
    pub fn with_documents(contents: Vec<&str>) -> Self {
        Self {
            retriever: Arc::new(StubRetriever::with_documents(contents)),
        }
    }

    pub fn retriever_calls(&self) -> usize {
        self.retriever.calls()
    }
}

impl RetrieverFactory for StubVectorStore {
    fn as_retriever(&self) -> Arc<dyn DocumentRetriever> {
        self.retriever.clone()
    }
}
