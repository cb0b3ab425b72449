//! Together AI configuration

use serde::{Deserialize, Serialize};
use std::env;

use ragchat_core::{Error, Result};

/// Configuration for the Together AI chat client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogetherConfig {
    pub api_key: String,
    pub api_url: String,
}

impl TogetherConfig {
    /// Create configuration from environment variables
    ///
    /// A missing `TOGETHER_API_KEY` is a fatal startup condition.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("TOGETHER_API_KEY").map_err(|_| {
            Error::Configuration(
                "TOGETHER_API_KEY environment variable not found".to_string(),
            )
        })?;

        let api_url = env::var("TOGETHER_API_URL")
            .unwrap_or_else(|_| "https://api.together.xyz".to_string());

        Ok(Self { api_key, api_url })
    }

    /// Create configuration with an explicit API key
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: "https://api.together.xyz".to_string(),
        }
    }
}
