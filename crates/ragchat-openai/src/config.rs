//! OpenAI configuration

use serde::{Deserialize, Serialize};
use std::env;

use ragchat_core::{Error, Result};

/// Configuration for the OpenAI embeddings client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_url: String,
    pub embedding_model: String,
}

impl OpenAiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Configuration("OPENAI_API_KEY environment variable not found".to_string())
        })?;

        let api_url =
            env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        let embedding_model = env::var("OPENAI_EMBEDDING_MODEL")
            .unwrap_or_else(|_| "text-embedding-ada-002".to_string());

        Ok(Self {
            api_key,
            api_url,
            embedding_model,
        })
    }

    /// Create configuration with an explicit API key
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: "https://api.openai.com".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
        }
    }
}
