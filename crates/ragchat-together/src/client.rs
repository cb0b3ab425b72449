//! Together AI chat client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ragchat_core::{ChatModel, Error, Result};

use crate::config::TogetherConfig;

/// Together AI chat-completion client
///
/// Binds the provider credential once at construction; the model identifier
/// is supplied per call. No retry or backoff is performed here; a failed or
/// hung provider call surfaces to the caller.
pub struct TogetherClient {
    config: TogetherConfig,
    client: Client,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl TogetherClient {
    /// Model constants
    pub const LLAMA_3_8B_CHAT: &'static str = "meta-llama/Llama-3-8b-chat-hf";
    pub const MIXTRAL_8X7B_INSTRUCT: &'static str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

    /// Create a new Together client from configuration
    pub fn new(config: TogetherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new Together client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = TogetherConfig::from_env()?;
        Self::new(config)
    }

    fn extract_answer(response: ChatResponse) -> Result<String> {
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::ChatModel("Empty response from Together API".to_string()))
    }
}

#[async_trait]
impl ChatModel for TogetherClient {
    async fn complete(&self, model_id: &str, prompt: &str) -> Result<String> {
        let request_body = ChatRequest {
            model: model_id.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let url = format!("{}/v1/chat/completions", self.config.api_url);

        tracing::debug!(model = model_id, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::ChatModel(format!(
                "Together API request failed with status {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Self::extract_answer(parsed)
    }
}
