//! Chat model trait

use async_trait::async_trait;

use crate::Result;

/// Trait for hosted chat-completion providers (e.g., Together AI)
///
/// This trait defines the single operation the inference core needs from an
/// LLM provider: send a fully assembled prompt to a named model and get the
/// completion text back. Retries, backoff, and streaming are left to the
/// provider's transport layer.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a prompt to the given model and return the completion text
    async fn complete(&self, model_id: &str, prompt: &str) -> Result<String>;
}
