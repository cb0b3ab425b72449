//! Chat session lifecycle
//!
//! Explicit state object replacing ambient session mutation: preprocessing
//! must complete before a backend and model are selected, and chatting is
//! only possible once both selections are in place.

use serde::{Deserialize, Serialize};

use ragchat_core::{ChatTurn, Error, Result};

use crate::backends::Backend;
use crate::engine::InferenceEngine;

/// Lifecycle states of a chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Uninitialized,
    Preprocessed,
    Ready,
}

/// One user's chat session: selected backend, selected model, turn history
///
/// The session owns the conversation history; the inference engine reads it
/// and never mutates it.
pub struct ChatSession {
    state: SessionState,
    backend: Option<Backend>,
    model_id: Option<String>,
    history: Vec<ChatTurn>,
}

impl ChatSession {
    /// Create a new, uninitialized session
    pub fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
            backend: None,
            model_id: None,
            history: Vec::new(),
        }
    }

    /// Get the current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the conversation history
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Mark document preprocessing as complete
    pub fn mark_preprocessed(&mut self) {
        if self.state == SessionState::Uninitialized {
            self.state = SessionState::Preprocessed;
        }
    }

    /// Select the vector backend for this session
    pub fn select_backend(&mut self, backend: Backend) -> Result<()> {
        if self.state == SessionState::Uninitialized {
            return Err(Error::Session(
                "Preprocessing must be completed before selecting a backend".to_string(),
            ));
        }
        self.backend = Some(backend);
        self.update_readiness();
        Ok(())
    }

    /// Select the chat model for this session
    pub fn select_model(&mut self, model_id: impl Into<String>) -> Result<()> {
        if self.state == SessionState::Uninitialized {
            return Err(Error::Session(
                "Preprocessing must be completed before selecting a chat model".to_string(),
            ));
        }
        self.model_id = Some(model_id.into());
        self.update_readiness();
        Ok(())
    }

    fn update_readiness(&mut self) {
        if self.backend.is_some() && self.model_id.is_some() {
            self.state = SessionState::Ready;
        }
    }

    /// Ask a question and record both turns in the history
    ///
    /// The user turn is appended before inference so the rendered history
    /// includes it, matching the answer the frontend displays. A failed
    /// inference leaves the user turn in place and the session usable.
    pub async fn chat(&mut self, engine: &InferenceEngine, question: &str) -> Result<String> {
        if self.state != SessionState::Ready {
            return Err(Error::Session(
                "Select both a vector backend and a chat model before chatting".to_string(),
            ));
        }

        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| Error::Session("No backend selected".to_string()))?;
        let model_id = self
            .model_id
            .as_deref()
            .ok_or_else(|| Error::Session("No chat model selected".to_string()))?;

        self.history.push(ChatTurn::user(question));

        let answer = engine
            .answer(backend, model_id, question, &self.history)
            .await?;

        self.history.push(ChatTurn::assistant(answer.clone()));
        Ok(answer)
    }

    /// Clear the conversation history; backend and model stay selected
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
