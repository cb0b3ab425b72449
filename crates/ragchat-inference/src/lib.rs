//! Multi-backend retrieval-and-answer dispatch for the RAG chat backend
//!
//! This crate routes a chat question through one of five interchangeable
//! vector backends, assembles a context-grounded prompt, and forwards it to
//! the hosted chat model. It also owns the chat session lifecycle.

pub mod backends;
mod engine;
mod session;

pub use backends::{Backend, BackendKind};
pub use engine::{EmbedderFactory, InferenceEngine, RetrievalConfig};
pub use session::{ChatSession, SessionState};

// Re-export core types for convenience
pub use ragchat_core::{
    ChatModel, ChatTurn, CollectionSearch, DocumentRetriever, Docstore, EmbeddingModel, Error,
    IndexHit, MetadataIndex, Result, RetrievedDocument, RetrieverFactory, Role, SimilarityIndex,
};
