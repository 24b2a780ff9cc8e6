use thiserror::Error;

/// Top-level error type for the MindMate system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for MindmateError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MindmateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Language model error: {0}")]
    LanguageModel(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for MindmateError {
    fn from(err: toml::de::Error) -> Self {
        MindmateError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for MindmateError {
    fn from(err: toml::ser::Error) -> Self {
        MindmateError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for MindmateError {
    fn from(err: serde_json::Error) -> Self {
        MindmateError::Serialization(err.to_string())
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MindmateError>;
