//! Error types for the dialogue turn engine.

use mindmate_core::error::MindmateError;

/// Errors the turn engine surfaces to its caller.
///
/// These are the only hard errors a UI shell ever sees. Recognition,
/// generation, and speech-output failures never appear here: the
/// orchestrator degrades them into fallback values inside a still-committed
/// turn.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Typed input was empty or whitespace-only. The turn is aborted and
    /// nothing is recorded.
    #[error("input cannot be empty")]
    EmptyInput,

    /// The turn state machine refused a transition, e.g. because another
    /// turn is already in flight.
    #[error("invalid turn state transition: {0}")]
    InvalidState(String),
}

impl From<EngineError> for MindmateError {
    fn from(err: EngineError) -> Self {
        MindmateError::Engine(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        assert_eq!(EngineError::EmptyInput.to_string(), "input cannot be empty");

        let err = EngineError::InvalidState("Idle -> Speaking".to_string());
        assert_eq!(
            err.to_string(),
            "invalid turn state transition: Idle -> Speaking"
        );
    }

    #[test]
    fn test_converts_to_mindmate_error() {
        let err: MindmateError = EngineError::EmptyInput.into();
        assert!(matches!(err, MindmateError::Engine(_)));
        assert!(err.to_string().contains("input cannot be empty"));
    }

    #[test]
    fn test_errors_implement_debug() {
        let dbg = format!("{:?}", EngineError::EmptyInput);
        assert!(dbg.contains("EmptyInput"));
    }
}
