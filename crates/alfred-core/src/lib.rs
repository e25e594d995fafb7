//! Core traits and types for Alfred
//!
//! This crate defines the fundamental traits and types used across the Alfred system.
//! It provides capability-facing interfaces for LLM providers, agent tools and
//! guest dataset sources, making the system test-friendly and extensible.

pub mod dataset;
pub mod error;
pub mod guest;
pub mod llm;
pub mod tool;

pub use dataset::DatasetSource;
pub use error::{Error, Result};
pub use guest::{Corpus, Document, DocumentMetadata, GuestRecord};
pub use llm::{ChatMessage, ChatRole, GenerationConfig, LLMProvider, ToolCall};
pub use tool::{Tool, ToolInput, ToolRegistry, ToolSpec};
