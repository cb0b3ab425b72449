//! Inference engine: routes a chat call to the selected backend adapter

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use ragchat_core::{ChatModel, ChatTurn, EmbeddingModel, Result};
use ragchat_openai::OpenAiEmbeddings;
use ragchat_together::TogetherClient;

use crate::backends::{self, Backend};

/// Per-backend retrieval settings
///
/// The k values intentionally differ between backends; they are carried
/// here as configuration rather than buried in the adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Documents fetched per FAISS query
    pub faiss_top_k: usize,
    /// Documents fetched per Qdrant query
    pub qdrant_limit: u64,
    /// Documents fetched per Pinecone query
    pub pinecone_top_k: usize,
    /// Qdrant collection holding the indexed text vectors
    pub qdrant_collection: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            faiss_top_k: 1,
            qdrant_limit: 2,
            pinecone_top_k: 2,
            qdrant_collection: backends::qdrant::TEXT_VECTORS_COLLECTION.to_string(),
        }
    }
}

/// Constructor for the lazily built shared embedding model
pub type EmbedderFactory = Box<dyn Fn() -> Result<Arc<dyn EmbeddingModel>> + Send + Sync>;

/// Dispatcher over the five retrieval backends
///
/// Stateless per call apart from the cached embedding model, which is
/// constructed on first use and shared for the engine's lifetime.
pub struct InferenceEngine {
    chat_model: Arc<dyn ChatModel>,
    embedder: OnceCell<Arc<dyn EmbeddingModel>>,
    embedder_factory: EmbedderFactory,
    config: RetrievalConfig,
}

impl InferenceEngine {
    /// Create an engine that lazily constructs the OpenAI embedder
    pub fn new(chat_model: Arc<dyn ChatModel>) -> Self {
        Self::with_embedder_factory(
            chat_model,
            Box::new(|| {
                OpenAiEmbeddings::from_env().map(|e| Arc::new(e) as Arc<dyn EmbeddingModel>)
            }),
        )
    }

    /// Create an engine with an explicitly injected embedding model
    pub fn with_embedder(
        chat_model: Arc<dyn ChatModel>,
        embedder: Arc<dyn EmbeddingModel>,
    ) -> Self {
        Self {
            chat_model,
            embedder: OnceCell::new_with(Some(embedder)),
            embedder_factory: Box::new(|| {
                OpenAiEmbeddings::from_env().map(|e| Arc::new(e) as Arc<dyn EmbeddingModel>)
            }),
            config: RetrievalConfig::default(),
        }
    }

    /// Create an engine with a custom embedder constructor
    pub fn with_embedder_factory(
        chat_model: Arc<dyn ChatModel>,
        embedder_factory: EmbedderFactory,
    ) -> Self {
        Self {
            chat_model,
            embedder: OnceCell::new(),
            embedder_factory,
            config: RetrievalConfig::default(),
        }
    }

    /// Create an engine bound to the Together chat provider
    ///
    /// Fails fast when the provider credential is missing from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        let chat_model = TogetherClient::from_env()?;
        Ok(Self::new(Arc::new(chat_model)))
    }

    /// Override the retrieval settings
    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the shared embedding model, constructing it on first use
    ///
    /// Concurrent first calls construct the model exactly once. Returns
    /// `None` when construction fails; adapters that need embeddings then
    /// report the uninitialized-embedder condition.
    async fn embedder(&self) -> Option<Arc<dyn EmbeddingModel>> {
        let result = self
            .embedder
            .get_or_try_init(|| async { (self.embedder_factory)() })
            .await;

        match result {
            Ok(embedder) => Some(embedder.clone()),
            Err(e) => {
                tracing::warn!("embedding model construction failed: {e}");
                None
            }
        }
    }

    /// Answer a question against the selected backend
    ///
    /// Retrieval is read-only; the caller owns the history and appends the
    /// new turns itself.
    pub async fn answer(
        &self,
        backend: &Backend,
        model_id: &str,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<String> {
        tracing::debug!(
            backend = backend.kind().display_name(),
            model = model_id,
            "running inference"
        );

        match backend {
            Backend::Chroma { retriever } => {
                backends::chroma::answer(
                    self.chat_model.as_ref(),
                    model_id,
                    question,
                    retriever.as_ref(),
                    history,
                )
                .await
            }
            Backend::Faiss { index, docstore } => {
                let embedder = self.embedder().await;
                backends::faiss::answer(
                    self.chat_model.as_ref(),
                    model_id,
                    question,
                    embedder.as_deref(),
                    index.as_ref(),
                    docstore.as_ref(),
                    history,
                    self.config.faiss_top_k,
                )
                .await
            }
            Backend::Qdrant { client } => {
                let embedder = self.embedder().await;
                backends::qdrant::answer(
                    self.chat_model.as_ref(),
                    model_id,
                    question,
                    embedder.as_deref(),
                    client.as_ref(),
                    history,
                    &self.config.qdrant_collection,
                    self.config.qdrant_limit,
                )
                .await
            }
            Backend::Pinecone { index } => {
                let embedder = self.embedder().await;
                backends::pinecone::answer(
                    self.chat_model.as_ref(),
                    model_id,
                    question,
                    embedder.as_deref(),
                    index.as_ref(),
                    history,
                    self.config.pinecone_top_k,
                )
                .await
            }
            Backend::Weaviate { store } => {
                backends::weaviate::answer(
                    self.chat_model.as_ref(),
                    model_id,
                    question,
                    store.as_ref(),
                    history,
                )
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::test_support::{
        EchoChatModel, StubCollectionSearch, StubEmbedder, StubIndex, StubMetadataIndex,
        StubRetriever, StubVectorStore,
    };
    use ragchat_core::{Error, RetrievedDocument};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn echo_engine_with_stub_embedder() -> InferenceEngine {
        InferenceEngine::with_embedder(Arc::new(EchoChatModel::new()), Arc::new(StubEmbedder::new()))
    }

    fn faiss_backend() -> Backend {
        let mut docstore = crate::backends::faiss::MemoryDocstore::new();
        docstore.insert(
            7,
            RetrievedDocument::from_content("Compound interest is interest on interest."),
        );
        Backend::Faiss {
            index: Arc::new(StubIndex::returning(vec![7])),
            docstore: Arc::new(docstore),
        }
    }

    #[tokio::test]
    async fn test_routes_chroma_exactly_once() {
        let retriever = Arc::new(StubRetriever::with_documents(vec!["ctx"]));
        let backend = Backend::Chroma {
            retriever: retriever.clone(),
        };
        let engine = echo_engine_with_stub_embedder();

        engine.answer(&backend, "test-model", "q", &[]).await.unwrap();
        assert_eq!(retriever.calls(), 1);
    }

    #[tokio::test]
    async fn test_routes_weaviate_exactly_once() {
        let store = Arc::new(StubVectorStore::with_documents(vec!["ctx"]));
        let backend = Backend::Weaviate {
            store: store.clone(),
        };
        let engine = echo_engine_with_stub_embedder();

        engine.answer(&backend, "test-model", "q", &[]).await.unwrap();
        assert_eq!(store.retriever_calls(), 1);
    }

    #[tokio::test]
    async fn test_faiss_end_to_end_context_injection() {
        let engine = echo_engine_with_stub_embedder();
        let backend = faiss_backend();

        let answer = engine
            .answer(&backend, "test-model", "What is compound interest?", &[])
            .await
            .unwrap();

        assert!(answer.contains("Compound interest is interest on interest."));
        assert!(answer.contains("What is compound interest?"));
    }

    #[tokio::test]
    async fn test_faiss_receives_configured_k() {
        let index = Arc::new(StubIndex::returning(vec![7]));
        let mut docstore = crate::backends::faiss::MemoryDocstore::new();
        docstore.insert(7, RetrievedDocument::from_content("ctx"));
        let backend = Backend::Faiss {
            index: index.clone(),
            docstore: Arc::new(docstore),
        };
        let engine = echo_engine_with_stub_embedder();

        engine.answer(&backend, "test-model", "q", &[]).await.unwrap();
        assert_eq!(index.last_k(), Some(1));
    }

    #[tokio::test]
    async fn test_qdrant_receives_configured_collection_and_limit() {
        let client = Arc::new(StubCollectionSearch::with_documents(vec!["ctx"]));
        let backend = Backend::Qdrant {
            client: client.clone(),
        };
        let engine = echo_engine_with_stub_embedder();

        engine.answer(&backend, "test-model", "q", &[]).await.unwrap();
        assert_eq!(
            client.last_request(),
            Some(("text_vectors".to_string(), 2))
        );
    }

    #[tokio::test]
    async fn test_pinecone_receives_configured_top_k() {
        let index = Arc::new(StubMetadataIndex::with_documents(vec!["ctx"]));
        let backend = Backend::Pinecone {
            index: index.clone(),
        };
        let engine = echo_engine_with_stub_embedder();

        engine.answer(&backend, "test-model", "q", &[]).await.unwrap();
        assert_eq!(index.last_top_k(), Some(2));
    }

    #[tokio::test]
    async fn test_custom_retrieval_config() {
        let index = Arc::new(StubMetadataIndex::with_documents(vec!["ctx"]));
        let backend = Backend::Pinecone {
            index: index.clone(),
        };
        let engine = echo_engine_with_stub_embedder().with_config(RetrievalConfig {
            pinecone_top_k: 5,
            ..RetrievalConfig::default()
        });

        engine.answer(&backend, "test-model", "q", &[]).await.unwrap();
        assert_eq!(index.last_top_k(), Some(5));
    }

    #[tokio::test]
    async fn test_embedder_constructed_once_under_concurrency() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let factory_constructions = constructions.clone();
        let engine = InferenceEngine::with_embedder_factory(
            Arc::new(EchoChatModel::new()),
            Box::new(move || {
                factory_constructions.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(StubEmbedder::new()) as Arc<dyn EmbeddingModel>)
            }),
        );

        let (first, second) = tokio::join!(engine.embedder(), engine.embedder());
        assert!(first.is_some());
        assert!(second.is_some());
        assert_eq!(constructions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_embedder_failure_surfaces_as_uninitialized() {
        let engine = InferenceEngine::with_embedder_factory(
            Arc::new(EchoChatModel::new()),
            Box::new(|| Err(Error::Configuration("no key".to_string()))),
        );
        let backend = faiss_backend();

        let err = engine
            .answer(&backend, "test-model", "q", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmbeddingModel(_)));
    }

    #[tokio::test]
    async fn test_chroma_does_not_touch_embedder() {
        let constructions = Arc::new(AtomicUsize::new(0));
        let factory_constructions = constructions.clone();
        let engine = InferenceEngine::with_embedder_factory(
            Arc::new(EchoChatModel::new()),
            Box::new(move || {
                factory_constructions.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(StubEmbedder::new()) as Arc<dyn EmbeddingModel>)
            }),
        );
        let backend = Backend::Chroma {
            retriever: Arc::new(StubRetriever::with_documents(vec!["ctx"])),
        };

        engine.answer(&backend, "test-model", "q", &[]).await.unwrap();
        assert_eq!(constructions.load(Ordering::SeqCst), 0);
    }
}
