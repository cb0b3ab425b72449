//! Error types for the RAG chat backend

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the RAG chat system
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported vector backend: {0}")]
    UnsupportedBackend(String),

    #[error("Embedding model error: {0}")]
    EmbeddingModel(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Chat model error: {0}")]
    ChatModel(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
