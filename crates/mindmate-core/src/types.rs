use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Theme taxonomy
// =============================================================================

/// A wellness theme tag from the fixed closed taxonomy.
///
/// Exactly one theme is attached to every processed utterance. `Wellness`
/// is the neutral default used when no keyword rule matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Performance Anxiety")]
    PerformanceAnxiety,
    #[serde(rename = "Sleep Disturbance / Insomnia")]
    SleepDisturbance,
    #[serde(rename = "Burnout")]
    Burnout,
    #[serde(rename = "Chronic Stress")]
    ChronicStress,
    #[serde(rename = "Somatic Symptoms of Anxiety")]
    SomaticAnxiety,
    #[serde(rename = "Early Signs of Depression")]
    EarlyDepression,
    #[serde(rename = "Social Isolation")]
    SocialIsolation,
    #[serde(rename = "Attention Difficulties / Mental Fatigue")]
    AttentionDifficulties,
    #[serde(rename = "Emotional Eating")]
    EmotionalEating,
    #[serde(rename = "Low Self-Esteem")]
    LowSelfEsteem,
    #[serde(rename = "Social Anxiety")]
    SocialAnxiety,
    #[serde(rename = "Generalized Anxiety")]
    GeneralizedAnxiety,
    #[serde(rename = "Avoidant Coping")]
    AvoidantCoping,
    #[serde(rename = "Depressive Symptoms")]
    DepressiveSymptoms,
    #[serde(rename = "Rumination / Overthinking")]
    Rumination,
    #[serde(rename = "Loss of Agency / Helplessness")]
    LossOfAgency,
    #[serde(rename = "Mood Swings")]
    MoodSwings,
    #[serde(rename = "Workaholism / Perfectionism")]
    Workaholism,
    #[serde(rename = "Digital Addiction / Anxiety")]
    DigitalAddiction,
    #[serde(rename = "Imposter Syndrome")]
    ImposterSyndrome,
    /// Neutral default when no specific theme is detected.
    #[default]
    #[serde(rename = "Wellness")]
    Wellness,
}

impl Theme {
    /// All themes in taxonomy order, the default last.
    pub const ALL: [Theme; 21] = [
        Theme::PerformanceAnxiety,
        Theme::SleepDisturbance,
        Theme::Burnout,
        Theme::ChronicStress,
        Theme::SomaticAnxiety,
        Theme::EarlyDepression,
        Theme::SocialIsolation,
        Theme::AttentionDifficulties,
        Theme::EmotionalEating,
        Theme::LowSelfEsteem,
        Theme::SocialAnxiety,
        Theme::GeneralizedAnxiety,
        Theme::AvoidantCoping,
        Theme::DepressiveSymptoms,
        Theme::Rumination,
        Theme::LossOfAgency,
        Theme::MoodSwings,
        Theme::Workaholism,
        Theme::DigitalAddiction,
        Theme::ImposterSyndrome,
        Theme::Wellness,
    ];

    /// Human-readable tag as shown to users and the language model.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::PerformanceAnxiety => "Performance Anxiety",
            Theme::SleepDisturbance => "Sleep Disturbance / Insomnia",
            Theme::Burnout => "Burnout",
            Theme::ChronicStress => "Chronic Stress",
            Theme::SomaticAnxiety => "Somatic Symptoms of Anxiety",
            Theme::EarlyDepression => "Early Signs of Depression",
            Theme::SocialIsolation => "Social Isolation",
            Theme::AttentionDifficulties => "Attention Difficulties / Mental Fatigue",
            Theme::EmotionalEating => "Emotional Eating",
            Theme::LowSelfEsteem => "Low Self-Esteem",
            Theme::SocialAnxiety => "Social Anxiety",
            Theme::GeneralizedAnxiety => "Generalized Anxiety",
            Theme::AvoidantCoping => "Avoidant Coping",
            Theme::DepressiveSymptoms => "Depressive Symptoms",
            Theme::Rumination => "Rumination / Overthinking",
            Theme::LossOfAgency => "Loss of Agency / Helplessness",
            Theme::MoodSwings => "Mood Swings",
            Theme::Workaholism => "Workaholism / Perfectionism",
            Theme::DigitalAddiction => "Digital Addiction / Anxiety",
            Theme::ImposterSyndrome => "Imposter Syndrome",
            Theme::Wellness => "Wellness",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Utterance
// =============================================================================

/// How an utterance entered the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtteranceSource {
    /// Entered through the text input box.
    Typed,
    /// Transcribed from microphone audio.
    Spoken,
}

/// A single raw user utterance. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub source: UtteranceSource,
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    /// Create a typed utterance stamped with the current time.
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: UtteranceSource::Typed,
            timestamp: Utc::now(),
        }
    }

    /// Create a spoken utterance stamped with the current time.
    pub fn spoken(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: UtteranceSource::Spoken,
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// Turn
// =============================================================================

/// One complete request/response cycle plus its derived theme and suggestion.
///
/// Created atomically once the full pipeline for one user action completes;
/// never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub utterance: Utterance,
    pub theme: Theme,
    pub suggestion: String,
    pub reply_text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Assemble a completed turn.
    pub fn new(utterance: Utterance, theme: Theme, suggestion: String, reply_text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            utterance,
            theme,
            suggestion,
            reply_text,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The in-memory, process-lifetime conversation history.
///
/// Append-only: turns are added in conversation order and never removed.
/// `current_theme` and `current_suggestion` always mirror the last committed
/// turn. The session is a plain value owned by the caller (typically the UI
/// shell) and mutated only through the orchestrator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    turns: Vec<Turn>,
    pub current_theme: Theme,
    pub current_suggestion: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a fresh session with an empty transcript.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            turns: Vec::new(),
            current_theme: Theme::Wellness,
            current_suggestion: String::new(),
        }
    }

    /// Append a completed turn and update the current theme/suggestion.
    ///
    /// This is the single point where session state changes; from the
    /// caller's perspective the append is atomic.
    pub fn commit(&mut self, turn: Turn) {
        self.current_theme = turn.theme;
        self.current_suggestion = turn.suggestion.clone();
        self.turns.push(turn);
    }

    /// The ordered transcript, oldest first.
    pub fn transcript(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recently committed turn, if any.
    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The suggestion used in the immediately preceding turn, if any.
    pub fn previous_suggestion(&self) -> Option<&str> {
        self.turns.last().map(|t| t.suggestion.as_str())
    }

    /// Number of committed turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
