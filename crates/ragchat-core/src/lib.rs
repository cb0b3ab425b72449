//! Core traits and types for the RAG chat backend
//!
//! This crate defines the fundamental traits and types used across the system.
//! It provides capability-facing interfaces for chat models, embedding models,
//! and the five retrieval backend protocols, making the system test-friendly
//! and extensible.

pub mod chat_model;
pub mod embedding;
pub mod error;
pub mod history;
pub mod prompt;
pub mod retrieval;

pub use chat_model::ChatModel;
pub use embedding::EmbeddingModel;
pub use error::{Error, Result};
pub use history::{ChatTurn, Role, format_history, question_with_history};
pub use retrieval::{
    CollectionSearch, DocumentRetriever, Docstore, IndexHit, MetadataIndex, RetrievedDocument,
    RetrieverFactory, SimilarityIndex,
};
