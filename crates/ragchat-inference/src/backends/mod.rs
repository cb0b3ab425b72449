//! Retrieval backend adapters
//!
//! One module per backend protocol. Each adapter retrieves context its own
//! way, assembles the prompt, and invokes the chat model; the dispatcher in
//! `engine` selects the adapter from the `Backend` variant.

pub mod chroma;
pub mod faiss;
pub mod pinecone;
pub mod qdrant;
pub mod weaviate;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ragchat_core::{
    CollectionSearch, DocumentRetriever, Docstore, Error, MetadataIndex, Result,
    RetrievedDocument, RetrieverFactory, SimilarityIndex,
};

/// Supported vector backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    Chroma,
    Faiss,
    Qdrant,
    Pinecone,
    Weaviate,
}

impl BackendKind {
    /// Get the display name for this backend
    pub fn display_name(&self) -> &'static str {
        match self {
            BackendKind::Chroma => "Chroma",
            BackendKind::Faiss => "FAISS",
            BackendKind::Qdrant => "Qdrant",
            BackendKind::Pinecone => "Pinecone",
            BackendKind::Weaviate => "Weaviate",
        }
    }

    /// Get all supported backends
    pub fn all() -> Vec<BackendKind> {
        vec![
            BackendKind::Chroma,
            BackendKind::Faiss,
            BackendKind::Qdrant,
            BackendKind::Pinecone,
            BackendKind::Weaviate,
        ]
    }

    /// Parse a backend name from the closed set
    ///
    /// Any name outside the set is a typed failure, never a silent no-op.
    pub fn parse(name: &str) -> Result<BackendKind> {
        match name.to_lowercase().as_str() {
            "chroma" => Ok(BackendKind::Chroma),
            "faiss" => Ok(BackendKind::Faiss),
            "qdrant" => Ok(BackendKind::Qdrant),
            "pinecone" => Ok(BackendKind::Pinecone),
            "weaviate" => Ok(BackendKind::Weaviate),
            _ => Err(Error::UnsupportedBackend(name.to_string())),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A selected backend together with the handles it needs
///
/// Each variant carries only the handles its protocol consumes, so a chat
/// call never sees the four irrelevant handles.
#[derive(Clone)]
pub enum Backend {
    Chroma {
        retriever: Arc<dyn DocumentRetriever>,
    },
    Faiss {
        index: Arc<dyn SimilarityIndex>,
        docstore: Arc<dyn Docstore>,
    },
    Qdrant {
        client: Arc<dyn CollectionSearch>,
    },
    Pinecone {
        index: Arc<dyn MetadataIndex>,
    },
    Weaviate {
        store: Arc<dyn RetrieverFactory>,
    },
}

impl Backend {
    /// Get the kind of this backend
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Chroma { .. } => BackendKind::Chroma,
            Backend::Faiss { .. } => BackendKind::Faiss,
            Backend::Qdrant { .. } => BackendKind::Qdrant,
            Backend::Pinecone { .. } => BackendKind::Pinecone,
            Backend::Weaviate { .. } => BackendKind::Weaviate,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Backend({})", self.kind().display_name())
    }
}

/// Newline-join the content of retrieved documents into one context block
pub(crate) fn join_contents(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
