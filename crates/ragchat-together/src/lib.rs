//! Together AI integration for the RAG chat backend
//!
//! This crate provides the Together AI implementation of the ChatModel trait.

mod client;
mod config;


pub use client::TogetherClient;
pub use config::TogetherConfig;

// Re-export core types for convenience
pub use ragchat_core::{ChatModel, Error, Result};
