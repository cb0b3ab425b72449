//! OpenAI embeddings integration for the RAG chat backend
//!
//! This crate provides the OpenAI implementation of the EmbeddingModel trait,
//! used as the shared query embedder across the vector backends.

mod config;
mod embeddings;

pub use config::OpenAiConfig;
pub use embeddings::OpenAiEmbeddings;

// Re-export core types for convenience
pub use ragchat_core::{EmbeddingModel, Error, Result};
