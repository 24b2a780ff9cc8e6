//! Dialogue turn engine for MindMate.
//!
//! Drives one full conversational turn: acquire input, classify a wellness
//! theme, pick a non-repeating self-care suggestion, generate an empathetic
//! reply through a language-model collaborator, speak it, and commit the
//! turn to the session transcript.

pub mod classifier;
pub mod collaborator;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod selector;
pub mod state;

pub use classifier::{RuleTable, ThemeClassifier, ThemeRule};
pub use collaborator::{
    LanguageModel, LlmFailure, NullSpeechSink, NullSpeechToText, SpeechError, SpeechSink,
    SpeechToText, TranscriptError,
};
pub use error::EngineError;
pub use orchestrator::DialogueOrchestrator;
pub use prompt::{PromptBuilder, PromptPayload};
pub use selector::{BankEntry, SuggestionBank, SuggestionSelector};
pub use state::{StateMachine, TurnState};
