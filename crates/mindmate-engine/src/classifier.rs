//! Keyword-based theme classification.
//!
//! Maps raw utterance text to a wellness theme by scanning an ordered table
//! of (keyword set, theme) rules. The first rule with any matching keyword
//! wins; the table order is the documented priority order, so utterances
//! containing keywords from several themes resolve deterministically. When
//! nothing matches, the neutral `Wellness` theme is returned.

use serde::{Deserialize, Serialize};

use mindmate_core::error::{MindmateError, Result};
use mindmate_core::types::Theme;

/// One ordered rule: if any keyword appears in the utterance, the theme applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRule {
    pub theme: Theme,
    pub keywords: Vec<String>,
}

/// The ordered keyword-to-theme rule table.
///
/// Membership is configuration, not control flow: the table can be replaced
/// from an external TOML file without touching the matching algorithm. Rules
/// are evaluated top to bottom; more specific themes sit above broader ones
/// so that, e.g., "can't sleep and I'm exhausted" resolves to the sleep rule
/// before the burnout rule gets a look.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable {
    pub rules: Vec<ThemeRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleTable {
    /// The curated built-in table covering all twenty named themes.
    pub fn builtin() -> Self {
        let rules = vec![
            rule(
                Theme::SleepDisturbance,
                &[
                    "can't sleep",
                    "cant sleep",
                    "insomnia",
                    "sleepless",
                    "awake all night",
                    "trouble sleeping",
                ],
            ),
            rule(
                Theme::PerformanceAnxiety,
                &[
                    "presentation",
                    "interview",
                    "exam",
                    "before my meeting",
                    "stage fright",
                    "big meeting",
                ],
            ),
            rule(
                Theme::ImposterSyndrome,
                &["imposter", "impostor", "a fraud", "don't deserve", "dont deserve"],
            ),
            rule(
                Theme::Workaholism,
                &[
                    "perfectionist",
                    "can't stop working",
                    "cant stop working",
                    "overworking",
                    "workaholic",
                ],
            ),
            rule(
                Theme::DigitalAddiction,
                &["doomscroll", "screen time", "phone addict", "social media", "scrolling"],
            ),
            rule(
                Theme::EmotionalEating,
                &["stress eating", "binge eating", "comfort food", "overeating", "urge to eat"],
            ),
            rule(
                Theme::SocialAnxiety,
                &[
                    "social situations",
                    "talking to people",
                    "being judged",
                    "crowds",
                    "meeting new people",
                ],
            ),
            rule(
                Theme::SocialIsolation,
                &["lonely", "isolated", "no friends", "no one to talk", "all alone"],
            ),
            rule(
                Theme::SomaticAnxiety,
                &[
                    "heart racing",
                    "racing heart",
                    "chest tight",
                    "tight chest",
                    "sweating",
                    "shaky",
                    "nauseous",
                ],
            ),
            rule(
                Theme::Rumination,
                &[
                    "overthinking",
                    "can't stop thinking",
                    "cant stop thinking",
                    "ruminating",
                    "replaying",
                ],
            ),
            rule(
                Theme::AttentionDifficulties,
                &["can't focus", "cant focus", "distracted", "concentrate", "brain fog"],
            ),
            rule(
                Theme::Burnout,
                &["burnout", "burned out", "burnt out", "exhausted", "drained", "tired"],
            ),
            rule(
                Theme::ChronicStress,
                &["stressed", "under pressure", "overwhelmed", "so much tension"],
            ),
            rule(
                Theme::LossOfAgency,
                &["helpless", "no control", "powerless", "trapped", "stuck"],
            ),
            rule(
                Theme::LowSelfEsteem,
                &["worthless", "hate myself", "not good enough", "i'm a failure", "im a failure"],
            ),
            rule(
                Theme::AvoidantCoping,
                &["avoiding", "procrastinating", "putting off", "keep postponing"],
            ),
            rule(
                Theme::MoodSwings,
                &["mood swings", "up and down", "irritable", "snapping at"],
            ),
            rule(
                Theme::EarlyDepression,
                &["numb", "feel empty", "no interest", "nothing matters", "lost interest"],
            ),
            rule(
                Theme::DepressiveSymptoms,
                &["depressed", "depression", "hopeless", "crying", "sad"],
            ),
            rule(
                Theme::GeneralizedAnxiety,
                &["anxious", "anxiety", "worried", "worrying", "nervous", "panic"],
            ),
        ];
        Self { rules }
    }

    /// Load a rule table from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table: RuleTable = toml::from_str(&content)?;
        if table.rules.is_empty() {
            return Err(MindmateError::Config(
                "rule table must contain at least one rule".to_string(),
            ));
        }
        Ok(table)
    }
}

fn rule(theme: Theme, keywords: &[&str]) -> ThemeRule {
    ThemeRule {
        theme,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Classifies utterances against a rule table.
///
/// Pure and deterministic: no I/O, no side effects, same input always yields
/// the same theme.
#[derive(Debug, Clone)]
pub struct ThemeClassifier {
    table: RuleTable,
}

impl Default for ThemeClassifier {
    fn default() -> Self {
        Self::new(RuleTable::default())
    }
}

impl ThemeClassifier {
    /// Create a classifier over the given rule table.
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// Classify an utterance.
    ///
    /// Case-insensitive substring matching, first matching rule wins.
    /// Callers must not pass empty or whitespace-only text; the orchestrator
    /// filters such input before a turn reaches classification.
    pub fn classify(&self, text: &str) -> Theme {
        debug_assert!(
            !text.trim().is_empty(),
            "classify requires non-empty trimmed text"
        );
        let lowered = text.to_lowercase();
        for rule in &self.table.rules {
            if rule.keywords.iter().any(|k| lowered.contains(k.as_str())) {
                return rule.theme;
            }
        }
        Theme::Wellness
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ThemeClassifier {
        ThemeClassifier::default()
    }

    // ---- Table shape ----

    #[test]
    fn test_builtin_covers_all_named_themes() {
        let table = RuleTable::builtin();
        assert_eq!(table.rules.len(), 20);
        for theme in Theme::ALL.iter().filter(|t| **t != Theme::Wellness) {
            assert!(
                table.rules.iter().any(|r| r.theme == *theme),
                "no rule for {}",
                theme
            );
        }
    }

    #[test]
    fn test_builtin_has_no_wellness_rule() {
        // Wellness is the fall-through default, never a matched rule.
        let table = RuleTable::builtin();
        assert!(table.rules.iter().all(|r| r.theme != Theme::Wellness));
    }

    #[test]
    fn test_builtin_keywords_are_lowercase() {
        // Matching lowercases the utterance only, so table entries must
        // already be lowercase.
        for rule in RuleTable::builtin().rules {
            for kw in &rule.keywords {
                assert_eq!(kw, &kw.to_lowercase(), "keyword not lowercase: {}", kw);
            }
        }
    }

    // ---- Single-theme matching ----

    #[test]
    fn test_sleep_keywords() {
        assert_eq!(classifier().classify("I can't sleep"), Theme::SleepDisturbance);
        assert_eq!(
            classifier().classify("my insomnia is back"),
            Theme::SleepDisturbance
        );
    }

    #[test]
    fn test_burnout_keywords() {
        assert_eq!(classifier().classify("I'm so exhausted"), Theme::Burnout);
        assert_eq!(classifier().classify("completely burned out"), Theme::Burnout);
    }

    #[test]
    fn test_anxiety_keywords() {
        assert_eq!(
            classifier().classify("feeling anxious today"),
            Theme::GeneralizedAnxiety
        );
        assert_eq!(
            classifier().classify("I keep worrying about everything"),
            Theme::GeneralizedAnxiety
        );
    }

    #[test]
    fn test_somatic_keywords() {
        assert_eq!(
            classifier().classify("my heart racing won't stop"),
            Theme::SomaticAnxiety
        );
    }

    #[test]
    fn test_isolation_keywords() {
        assert_eq!(classifier().classify("I feel so lonely"), Theme::SocialIsolation);
    }

    #[test]
    fn test_imposter_keywords() {
        assert_eq!(
            classifier().classify("I feel like a fraud at work"),
            Theme::ImposterSyndrome
        );
    }

    #[test]
    fn test_rumination_keywords() {
        assert_eq!(
            classifier().classify("I keep overthinking every conversation"),
            Theme::Rumination
        );
    }

    #[test]
    fn test_digital_keywords() {
        assert_eq!(
            classifier().classify("I doomscroll until 2am"),
            Theme::DigitalAddiction
        );
    }

    // ---- Case insensitivity ----

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classifier().classify("I CAN'T SLEEP"), Theme::SleepDisturbance);
        assert_eq!(classifier().classify("So EXHAUSTED"), Theme::Burnout);
    }

    // ---- Default ----

    #[test]
    fn test_no_match_returns_wellness() {
        assert_eq!(classifier().classify("hello there"), Theme::Wellness);
        assert_eq!(classifier().classify("what a lovely morning"), Theme::Wellness);
    }

    // ---- Priority order ----

    #[test]
    fn test_sleep_wins_over_burnout() {
        // Scenario from the end-to-end contract: sleep keywords outrank
        // burnout keywords in the table.
        assert_eq!(
            classifier().classify("I can't sleep and I'm exhausted"),
            Theme::SleepDisturbance
        );
    }

    #[test]
    fn test_contradictory_keywords_resolve_by_order() {
        // "happy but anxious": only the anxiety rule matches, but when two
        // rules match the earlier one wins.
        assert_eq!(
            classifier().classify("happy but anxious"),
            Theme::GeneralizedAnxiety
        );
        // Somatic sits above generalized anxiety in the table.
        assert_eq!(
            classifier().classify("anxious and my chest tight"),
            Theme::SomaticAnxiety
        );
    }

    #[test]
    fn test_first_rule_wins_is_table_order() {
        let table = RuleTable {
            rules: vec![
                ThemeRule {
                    theme: Theme::Burnout,
                    keywords: vec!["tired".to_string()],
                },
                ThemeRule {
                    theme: Theme::SleepDisturbance,
                    keywords: vec!["tired".to_string()],
                },
            ],
        };
        let c = ThemeClassifier::new(table);
        assert_eq!(c.classify("so tired"), Theme::Burnout);
    }

    // ---- Determinism ----

    #[test]
    fn test_classify_is_deterministic() {
        let c = classifier();
        for _ in 0..10 {
            assert_eq!(c.classify("feeling anxious"), Theme::GeneralizedAnxiety);
        }
    }

    // ---- External table loading ----

    #[test]
    fn test_load_table_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(
            &path,
            r#"
[[rules]]
theme = "Burnout"
keywords = ["wiped out"]

[[rules]]
theme = "Generalized Anxiety"
keywords = ["jittery"]
"#,
        )
        .unwrap();

        let table = RuleTable::load(&path).unwrap();
        assert_eq!(table.rules.len(), 2);
        let c = ThemeClassifier::new(table);
        assert_eq!(c.classify("totally wiped out"), Theme::Burnout);
        assert_eq!(c.classify("feeling jittery"), Theme::GeneralizedAnxiety);
        assert_eq!(c.classify("hello"), Theme::Wellness);
    }

    #[test]
    fn test_load_empty_table_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "rules = []\n").unwrap();
        assert!(RuleTable::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RuleTable::load(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_table_serde_round_trip() {
        let table = RuleTable::builtin();
        let toml = toml::to_string(&table).unwrap();
        let back: RuleTable = toml::from_str(&toml).unwrap();
        assert_eq!(back.rules.len(), table.rules.len());
        assert_eq!(back.rules[0].theme, table.rules[0].theme);
    }
}
