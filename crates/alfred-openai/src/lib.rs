//! OpenAI integration for Alfred
//!
//! This crate provides the OpenAI chat-completions implementation of the
//! LLMProvider trait, including function calling for agent tools.

mod client;
mod config;


pub use client::OpenAIClient;
pub use config::OpenAIConfig;

// Re-export core types for convenience
pub use alfred_core::{ChatMessage, ChatRole, Error, GenerationConfig, LLMProvider, Result, ToolCall};
