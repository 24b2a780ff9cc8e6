//! Prompt construction for the language-model collaborator.
//!
//! Assembles the fixed system instruction (persona, style constraints, the
//! theme taxonomy, exemplar suggestions, and the breathing cue protocol)
//! once, and pairs it with the current user turn. A pure formatter: no
//! network or device I/O, deterministic for a given configuration.

use serde::{Deserialize, Serialize};

use mindmate_core::types::Theme;

use crate::selector::SuggestionBank;

/// The request payload handed to the language model.
///
/// Carries only the constant system instruction and the current utterance.
/// Prior turns are deliberately absent: conversational memory is not part
/// of the engine's contract with the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub system_instruction: String,
    pub user_turn: String,
}

/// Builds prompt payloads around a fixed system instruction.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_instruction: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(&SuggestionBank::default())
    }
}

impl PromptBuilder {
    /// Assemble the system instruction from the taxonomy and the exemplar
    /// suggestion bank. The result is fixed for the builder's lifetime.
    pub fn new(bank: &SuggestionBank) -> Self {
        let taxonomy = Theme::ALL
            .iter()
            .filter(|t| **t != Theme::Wellness)
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join("\n");

        let exemplars = bank
            .entries
            .iter()
            .flat_map(|e| e.suggestions.iter())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let system_instruction = format!(
            "You are a kind, supportive mental health assistant. If you can't understand \
             what is being said, just say that you don't understand; do not try to calm \
             the user.\n\
             Respond empathetically and calmly. Suggest simple self-care actions and other \
             exercises, and try not to be too repetitive.\n\
             Keep replies short (~30 words). Avoid assuming distress from casual greetings.\n\
             Some self-care suggestions for style and tone; generate suggestions similar to \
             these according to the user's messages:\n{exemplars}\n\
             Try to detect themes such as:\n{taxonomy}\n\
             If suggesting breathing: say \"Inhale...\", count, then \"Hold...\", then \
             \"Exhale...\"."
        );

        Self { system_instruction }
    }

    /// The fixed system instruction.
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Pair the current utterance with the system instruction.
    pub fn build(&self, utterance_text: &str) -> PromptPayload {
        PromptPayload {
            system_instruction: self.system_instruction.clone(),
            user_turn: utterance_text.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::default()
    }

    #[test]
    fn test_build_carries_user_turn() {
        let payload = builder().build("I feel anxious");
        assert_eq!(payload.user_turn, "I feel anxious");
    }

    #[test]
    fn test_build_is_deterministic() {
        let b = builder();
        assert_eq!(b.build("same text"), b.build("same text"));
    }

    #[test]
    fn test_system_instruction_invariant_across_inputs() {
        let b = builder();
        let a = b.build("first message");
        let c = b.build("a completely different message");
        assert_eq!(a.system_instruction, c.system_instruction);
        assert_ne!(a.user_turn, c.user_turn);
    }

    #[test]
    fn test_instruction_lists_full_taxonomy() {
        let b = builder();
        for theme in Theme::ALL.iter().filter(|t| **t != Theme::Wellness) {
            assert!(
                b.system_instruction().contains(theme.label()),
                "taxonomy missing {}",
                theme
            );
        }
    }

    #[test]
    fn test_instruction_contains_breathing_protocol() {
        let instruction = builder().system_instruction().to_string();
        assert!(instruction.contains("Inhale..."));
        assert!(instruction.contains("Hold..."));
        assert!(instruction.contains("Exhale..."));
    }

    #[test]
    fn test_instruction_contains_style_rules() {
        let instruction = builder().system_instruction().to_string();
        assert!(instruction.contains("~30 words"));
        assert!(instruction.contains("casual greetings"));
        assert!(instruction.contains("don't understand"));
    }

    #[test]
    fn test_instruction_contains_exemplar_suggestions() {
        let instruction = builder().system_instruction().to_string();
        assert!(instruction.contains("Take 3 deep breaths."));
        assert!(instruction.contains("worry list"));
    }

    #[test]
    fn test_custom_bank_feeds_exemplars() {
        let bank = SuggestionBank {
            entries: vec![crate::selector::BankEntry {
                theme: Theme::Wellness,
                suggestions: vec!["Hum a favorite song for a minute.".to_string()],
            }],
        };
        let b = PromptBuilder::new(&bank);
        assert!(b
            .system_instruction()
            .contains("Hum a favorite song for a minute."));
    }

    #[test]
    fn test_payload_serde_round_trip() {
        let payload = builder().build("hello");
        let json = serde_json::to_string(&payload).unwrap();
        let back: PromptPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
