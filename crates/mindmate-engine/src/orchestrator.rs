//! Dialogue orchestrator: drives one full conversational turn.
//!
//! Sequences input acquisition, classification, generation, speech output,
//! and session commit through the turn state machine. Every step past input
//! acquisition degrades gracefully: recognition, generation, and playback
//! failures all end in a committed turn carrying a fallback value. Only
//! empty typed input aborts a turn with nothing recorded.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use mindmate_core::config::{MindmateConfig, SpeechConfig};
use mindmate_core::types::{Session, Turn, Utterance};

use crate::classifier::{RuleTable, ThemeClassifier};
use crate::collaborator::{LanguageModel, SpeechSink, SpeechToText, TranscriptError};
use crate::error::EngineError;
use crate::prompt::PromptBuilder;
use crate::selector::{SuggestionBank, SuggestionSelector};
use crate::state::{StateMachine, TurnState};

/// Central coordinator for the dialogue turn pipeline.
///
/// Holds the pure local components (classifier, selector, prompt builder)
/// and the three injected collaborators. The session is not owned here; the
/// caller passes it in by mutable reference and retains it across turns.
pub struct DialogueOrchestrator {
    classifier: ThemeClassifier,
    selector: Mutex<SuggestionSelector>,
    prompt_builder: PromptBuilder,
    llm: Arc<dyn LanguageModel>,
    stt: Arc<dyn SpeechToText>,
    speech: Arc<dyn SpeechSink>,
    state: StateMachine,
    speech_config: SpeechConfig,
    fallback_reply: String,
}

impl DialogueOrchestrator {
    /// Create an orchestrator from configuration, loading external rule
    /// table and suggestion bank overrides when the config names them.
    pub fn new(
        config: &MindmateConfig,
        llm: Arc<dyn LanguageModel>,
        stt: Arc<dyn SpeechToText>,
        speech: Arc<dyn SpeechSink>,
    ) -> mindmate_core::Result<Self> {
        let table = match &config.engine.rules_path {
            Some(path) => RuleTable::load(std::path::Path::new(path))?,
            None => RuleTable::default(),
        };
        let bank = match &config.engine.bank_path {
            Some(path) => SuggestionBank::load(std::path::Path::new(path))?,
            None => SuggestionBank::default(),
        };
        Ok(Self::with_components(
            config,
            ThemeClassifier::new(table),
            SuggestionSelector::new(bank.clone()),
            PromptBuilder::new(&bank),
            llm,
            stt,
            speech,
        ))
    }

    /// Create an orchestrator from pre-built components (used by tests and
    /// callers that need a seeded selector or custom tables).
    #[allow(clippy::too_many_arguments)]
    pub fn with_components(
        config: &MindmateConfig,
        classifier: ThemeClassifier,
        selector: SuggestionSelector,
        prompt_builder: PromptBuilder,
        llm: Arc<dyn LanguageModel>,
        stt: Arc<dyn SpeechToText>,
        speech: Arc<dyn SpeechSink>,
    ) -> Self {
        Self {
            classifier,
            selector: Mutex::new(selector),
            prompt_builder,
            llm,
            stt,
            speech,
            state: StateMachine::new(),
            speech_config: config.speech.clone(),
            fallback_reply: config.llm.fallback_reply.clone(),
        }
    }

    /// The current turn state (Idle whenever no turn is in flight).
    pub fn state(&self) -> TurnState {
        self.state.current()
    }

    /// Handle the "send typed text" trigger.
    ///
    /// Empty or whitespace-only text aborts the turn: no turn is recorded,
    /// the session is untouched, and `EngineError::EmptyInput` is returned.
    pub async fn handle_text(
        &self,
        session: &mut Session,
        text: &str,
    ) -> Result<Turn, EngineError> {
        self.state.transition(TurnState::AwaitingInput)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Empty typed input; aborting turn");
            self.state.transition(TurnState::Idle)?;
            return Err(EngineError::EmptyInput);
        }

        self.run_turn(session, Utterance::typed(trimmed)).await
    }

    /// Handle the "speak" trigger.
    ///
    /// Recognition failures do not abort the turn: a placeholder utterance
    /// is synthesized and the pipeline runs to commit, mirroring the
    /// language model's own explicit non-comprehension policy.
    pub async fn handle_speech(&self, session: &mut Session) -> Result<Turn, EngineError> {
        self.state.transition(TurnState::AwaitingInput)?;

        let utterance = match self.stt.listen().await {
            Ok(text) if !text.trim().is_empty() => Utterance::spoken(text.trim()),
            Ok(_) | Err(TranscriptError::NothingUnderstood) => {
                warn!("Speech captured but not understood; using placeholder");
                Utterance::spoken(self.speech_config.placeholder_unintelligible.clone())
            }
            Err(TranscriptError::ServiceUnavailable(e)) => {
                warn!("Speech recognition unavailable: {}", e);
                Utterance::spoken(self.speech_config.placeholder_service_error.clone())
            }
        };

        self.run_turn(session, utterance).await
    }

    // -- Private helpers --

    /// Run the pipeline from a captured utterance to a committed turn,
    /// resetting the state machine if anything propagates an error.
    async fn run_turn(
        &self,
        session: &mut Session,
        utterance: Utterance,
    ) -> Result<Turn, EngineError> {
        let result = self.run_pipeline(session, utterance).await;
        if result.is_err() {
            self.state.reset();
        }
        result
    }

    async fn run_pipeline(
        &self,
        session: &mut Session,
        utterance: Utterance,
    ) -> Result<Turn, EngineError> {
        // Classification and selection are pure, local, and cannot fail.
        self.state.transition(TurnState::Classifying)?;
        let theme = self.classifier.classify(&utterance.text);
        let suggestion = {
            let mut selector = self.selector.lock().expect("selector mutex poisoned");
            selector.select(theme, session.previous_suggestion())
        };
        debug!("Classified utterance as '{}'", theme);

        // The payload carries only the constant instruction and this turn's
        // utterance; the prior transcript is never sent.
        self.state.transition(TurnState::Generating)?;
        let payload = self.prompt_builder.build(&utterance.text);
        let reply_text = match self.llm.complete(&payload).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Language model returned an empty reply; using fallback");
                self.fallback_reply.clone()
            }
            Err(e) => {
                warn!("Language model call failed: {}; using fallback reply", e);
                self.fallback_reply.clone()
            }
        };

        // Playback is best-effort and never blocks the commit.
        self.state.transition(TurnState::Speaking)?;
        if self.speech_config.output_enabled {
            if let Err(e) = self.speech.speak(&reply_text).await {
                warn!("Speech output failed: {}", e);
            }
        }

        self.state.transition(TurnState::Committed)?;
        let turn = Turn::new(utterance, theme, suggestion, reply_text);
        session.commit(turn.clone());

        self.state.transition(TurnState::Idle)?;
        Ok(turn)
    }
}

// =============================================================================
// Tests
// =============================================================================
