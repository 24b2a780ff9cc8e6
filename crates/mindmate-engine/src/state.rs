//! Turn state machine with thread-safe transitions.
//!
//! Enforces valid state transitions for one dialogue turn:
//! - Idle -> AwaitingInput (user triggered send or speak)
//! - AwaitingInput -> Classifying (utterance acquired)
//! - AwaitingInput -> Idle (empty typed input, turn aborted)
//! - Classifying -> Generating (theme and suggestion chosen)
//! - Generating -> Speaking (reply text ready)
//! - Speaking -> Committed (turn appended to the session)
//! - Committed -> Idle (control returned to the caller)

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::EngineError;

/// Operational state of the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// No turn in progress. Ready to start.
    Idle,
    /// Acquiring the utterance from the typed or spoken input source.
    AwaitingInput,
    /// Running the local theme classifier and suggestion selector.
    Classifying,
    /// Waiting on the language-model collaborator for the reply.
    Generating,
    /// Handing the reply to the speech-output collaborator.
    Speaking,
    /// Turn committed to the session transcript.
    Committed,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnState::Idle => write!(f, "Idle"),
            TurnState::AwaitingInput => write!(f, "AwaitingInput"),
            TurnState::Classifying => write!(f, "Classifying"),
            TurnState::Generating => write!(f, "Generating"),
            TurnState::Speaking => write!(f, "Speaking"),
            TurnState::Committed => write!(f, "Committed"),
        }
    }
}

impl TurnState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &TurnState) -> bool {
        matches!(
            (self, target),
            (TurnState::Idle, TurnState::AwaitingInput)
                | (TurnState::AwaitingInput, TurnState::Classifying)
                | (TurnState::Classifying, TurnState::Generating)
                | (TurnState::Generating, TurnState::Speaking)
                | (TurnState::Speaking, TurnState::Committed)
                | (TurnState::Committed, TurnState::Idle)
                // Abort: empty typed input records nothing
                | (TurnState::AwaitingInput, TurnState::Idle)
        )
    }
}

/// Thread-safe state machine for turn transitions.
///
/// Wraps `TurnState` in an `Arc<Mutex<>>` so clones share state. All
/// transitions are validated before being applied; a rejected transition is
/// how an overlapping second turn gets refused while one is in flight.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<TurnState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(TurnState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> TurnState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    pub fn transition(&self, target: TurnState) -> Result<(), EngineError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Turn state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(EngineError::InvalidState(format!(
                "{} -> {}",
                *state, target
            )))
        }
    }

    /// Force the state machine back to Idle (used for error recovery).
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if *state != TurnState::Idle {
            tracing::warn!("Turn state machine reset to Idle from {}", *state);
        }
        *state = TurnState::Idle;
    }
}

// =============================================================================
// Tests
// =============================================================================
