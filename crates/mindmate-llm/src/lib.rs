//! Groq language-model collaborator for MindMate.
//!
//! Implements the engine's `LanguageModel` trait against Groq's
//! OpenAI-compatible chat completions API. Requests always carry exactly
//! two messages: the fixed system instruction and the current user turn.

pub mod client;
pub mod types;

pub use client::GroqClient;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice};
