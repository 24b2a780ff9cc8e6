//! Collaborator contracts consumed by the orchestrator.
//!
//! The language model, speech-to-text source, and speech-output sink are
//! replaceable external services behind narrow async traits. The engine
//! never depends on a concrete provider or platform API; implementations
//! live in sibling crates (or in the UI shell) and are injected as
//! `Arc<dyn Trait>`.

use async_trait::async_trait;

use crate::prompt::PromptPayload;

// =============================================================================
// Failure types
// =============================================================================

/// Failure from the language-model collaborator.
///
/// Every variant degrades to the configured fallback reply; none aborts the
/// turn.
#[derive(Debug, thiserror::Error)]
pub enum LlmFailure {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Failure from the speech-to-text collaborator.
///
/// The two kinds are distinguished so the orchestrator can record the
/// matching placeholder utterance, but both follow the same policy: the
/// turn proceeds and commits.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("no speech was understood")]
    NothingUnderstood,
    #[error("recognition service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Failure from the speech-output collaborator. Swallowed by the
/// orchestrator; playback is a side effect, not a gate.
#[derive(Debug, thiserror::Error)]
#[error("speech output failed: {0}")]
pub struct SpeechError(pub String);

// =============================================================================
// Traits
// =============================================================================

/// A language-model service that turns a prompt payload into reply text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Request a completion for the payload's system instruction and
    /// current user turn.
    async fn complete(&self, prompt: &PromptPayload) -> Result<String, LlmFailure>;
}

/// A speech-to-text source that captures one utterance from the user.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Listen for speech and return the transcribed text.
    async fn listen(&self) -> Result<String, TranscriptError>;
}

/// A best-effort audible playback sink.
#[async_trait]
pub trait SpeechSink: Send + Sync {
    /// Speak the given text aloud.
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

// =============================================================================
// No-op implementations
// =============================================================================

/// Speech source for headless deployments: always reports that the
/// recognition service is unavailable, which the orchestrator turns into
/// the placeholder utterance.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeechToText;

#[async_trait]
impl SpeechToText for NullSpeechToText {
    async fn listen(&self) -> Result<String, TranscriptError> {
        Err(TranscriptError::ServiceUnavailable(
            "no speech input device configured".to_string(),
        ))
    }
}

/// Speech sink that discards all playback requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeechSink;

#[async_trait]
impl SpeechSink for NullSpeechSink {
    async fn speak(&self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
