//! Self-care suggestion selection.
//!
//! Each theme maps to a small bank of curated suggestion strings. Selection
//! is uniform random among the theme's candidates, excluding the previous
//! turn's suggestion whenever an alternative exists, so consecutive turns on
//! the same theme do not repeat themselves. The random source is injected
//! (a seedable generator) to keep selection deterministic in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use mindmate_core::error::{MindmateError, Result};
use mindmate_core::types::Theme;

/// Candidate suggestions for one theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankEntry {
    pub theme: Theme,
    pub suggestions: Vec<String>,
}

/// The per-theme suggestion bank.
///
/// Like the rule table, the bank is configuration: it can be replaced from
/// an external TOML file. Themes without an entry fall back to the
/// `Wellness` bucket, which is always non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionBank {
    pub entries: Vec<BankEntry>,
}

impl Default for SuggestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SuggestionBank {
    /// The curated built-in bank, one exemplar per named theme plus the
    /// general wellness bucket.
    pub fn builtin() -> Self {
        let entries = vec![
            entry(
                Theme::PerformanceAnxiety,
                &[
                    "Try deep breathing exercises before your meeting. Practicing mindfulness \
                     or grounding techniques like the 5-4-3-2-1 method can also help reduce \
                     anxiety symptoms.",
                    "Rehearse once out loud, then stop. A short walk right before you start \
                     can settle pre-performance nerves.",
                ],
            ),
            entry(
                Theme::SleepDisturbance,
                &[
                    "Maintain a consistent sleep schedule and avoid screen time an hour before \
                     bed. Consider writing a 'worry list' before sleeping to help clear your mind.",
                    "Dim the lights an hour before bed and keep your room cool. If you're still \
                     awake after 20 minutes, get up and do something quiet until you feel sleepy.",
                ],
            ),
            entry(
                Theme::Burnout,
                &[
                    "Break tasks into very small steps and reward yourself for each one. Also, \
                     ensure you're getting proper nutrition and hydration to support energy levels.",
                    "Take a short walk and hydrate.",
                ],
            ),
            entry(
                Theme::ChronicStress,
                &[
                    "Schedule 10 minutes of quiet time daily for yourself. Breathing techniques \
                     or progressive muscle relaxation can reduce tension significantly.",
                    "Write down the three loudest stressors, then pick the one small thing you \
                     can act on today.",
                ],
            ),
            entry(
                Theme::SomaticAnxiety,
                &[
                    "Try writing about your feelings each morning. Mindful stretching or yoga \
                     can help calm the body and reduce physical symptoms of anxiety.",
                    "Place one hand on your belly and breathe slowly for a minute; slow exhales \
                     tell your body the alarm is over.",
                ],
            ),
            entry(
                Theme::EarlyDepression,
                &[
                    "Make time for small enjoyable activities daily, even if they don't feel \
                     fun right now. Talking to someone about your feelings can also help.",
                    "Pick one tiny pleasant thing for today and put it on your calendar so it \
                     actually happens.",
                ],
            ),
            entry(
                Theme::SocialIsolation,
                &[
                    "Reach out to one person you trust and have a short chat. Even brief human \
                     connection can help reduce feelings of isolation.",
                    "Send one short message to someone you haven't spoken to in a while; you \
                     don't need a reason.",
                ],
            ),
            entry(
                Theme::AttentionDifficulties,
                &[
                    "Use the Pomodoro technique: work in 25-minute focused sessions followed by \
                     short breaks. Also, keep your work environment distraction-free.",
                    "Pick a single task, silence notifications, and set a 15-minute timer. Small \
                     focused windows rebuild attention.",
                ],
            ),
            entry(
                Theme::EmotionalEating,
                &[
                    "Next time you feel the urge to eat, try journaling what you're feeling. \
                     Substitute emotional eating with a short walk or calming activity.",
                    "Pause for two minutes before snacking and name the feeling driving the \
                     urge; often naming it is enough to loosen its grip.",
                ],
            ),
            entry(
                Theme::LowSelfEsteem,
                &[
                    "Write down three small things you did well today. Practicing \
                     self-compassion and limiting comparisons with others is key.",
                    "Talk to yourself the way you'd talk to a friend who'd had your day.",
                ],
            ),
            entry(
                Theme::SocialAnxiety,
                &[
                    "Challenge negative thoughts with positive self-talk. Consider gradual \
                     exposure to social settings that feel safe.",
                    "Before a social event, plan one easy opener and one graceful exit; having \
                     both lowers the stakes.",
                ],
            ),
            entry(
                Theme::GeneralizedAnxiety,
                &[
                    "Try practicing daily diaphragmatic breathing and limit caffeine intake. \
                     Talking to a professional can also provide long-term support.",
                    "Try the 4-7-8 breathing technique.",
                ],
            ),
            entry(
                Theme::AvoidantCoping,
                &[
                    "Make a small list of avoided tasks and tackle one at a time with short \
                     breaks in between. Reward yourself for each completed item.",
                    "Shrink the avoided task until it takes five minutes, then do only that \
                     five minutes.",
                ],
            ),
            entry(
                Theme::DepressiveSymptoms,
                &[
                    "Create a simple morning routine with small wins. Try writing one thing \
                     you're looking forward to, even if it's minor.",
                    "Open the curtains and step into daylight for a few minutes; light and \
                     movement are small levers that still move.",
                ],
            ),
            entry(
                Theme::Rumination,
                &[
                    "Set a 10-minute timer for 'worry time', then consciously shift to an \
                     engaging activity. Use cognitive reframing to view situations more \
                     realistically.",
                    "Write the looping thought down once, then ask: is there an action here? \
                     If not, park it on paper.",
                ],
            ),
            entry(
                Theme::LossOfAgency,
                &[
                    "Focus on one small decision you can make today. Regaining control over \
                     small choices helps build confidence.",
                    "List what is and isn't in your hands right now; put your energy only on \
                     the first column.",
                ],
            ),
            entry(
                Theme::MoodSwings,
                &[
                    "Track your mood daily using a journal or app. Ensure you're getting \
                     enough sleep and reducing sugar/caffeine intake.",
                    "When a mood spike hits, delay reacting for ten minutes; most waves crest \
                     and fall on their own.",
                ],
            ),
            entry(
                Theme::Workaholism,
                &[
                    "Remind yourself that rest is productive too. Schedule short breaks as \
                     part of your workday and treat them as essential.",
                    "Set a hard stop time for today and tell someone about it so it sticks.",
                ],
            ),
            entry(
                Theme::DigitalAddiction,
                &[
                    "Try a 1-hour digital detox daily. Replace screen time with an offline \
                     activity like reading or walking.",
                    "Move the most-opened app off your home screen and charge your phone \
                     outside the bedroom tonight.",
                ],
            ),
            entry(
                Theme::ImposterSyndrome,
                &[
                    "Write a list of your recent accomplishments, no matter how small. Talk \
                     to a mentor or trusted friend for perspective.",
                    "Keep a 'done' file of wins and kind feedback; read it when the fraud \
                     feeling talks loudest.",
                ],
            ),
            entry(
                Theme::Wellness,
                &[
                    "Take 3 deep breaths.",
                    "Take a moment to stretch and drink a glass of water.",
                    "Step outside for a minute of fresh air.",
                ],
            ),
        ];
        Self { entries }
    }

    /// Load a bank from a TOML file.
    ///
    /// The file must provide a non-empty `Wellness` bucket, since every
    /// theme without its own entry falls back to it.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let bank: SuggestionBank = toml::from_str(&content)?;
        let wellness_ok = bank
            .entries
            .iter()
            .any(|e| e.theme == Theme::Wellness && !e.suggestions.is_empty());
        if !wellness_ok {
            return Err(MindmateError::Config(
                "suggestion bank must contain a non-empty Wellness bucket".to_string(),
            ));
        }
        Ok(bank)
    }

    /// Candidates for a theme, falling back to the Wellness bucket when the
    /// theme has no entry or an empty one.
    pub fn candidates(&self, theme: Theme) -> &[String] {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.theme == theme && !e.suggestions.is_empty())
        {
            return &entry.suggestions;
        }
        self.entries
            .iter()
            .find(|e| e.theme == Theme::Wellness)
            .map(|e| e.suggestions.as_slice())
            .unwrap_or(&[])
    }
}

fn entry(theme: Theme, suggestions: &[&str]) -> BankEntry {
    BankEntry {
        theme,
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

/// Picks one suggestion per turn, avoiding immediate repetition.
#[derive(Debug)]
pub struct SuggestionSelector {
    bank: SuggestionBank,
    rng: StdRng,
}

impl Default for SuggestionSelector {
    fn default() -> Self {
        Self::new(SuggestionBank::default())
    }
}

impl SuggestionSelector {
    /// Create a selector with an OS-seeded random source.
    pub fn new(bank: SuggestionBank) -> Self {
        Self {
            bank,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a selector with a fixed seed for deterministic behavior.
    pub fn seeded(bank: SuggestionBank, seed: u64) -> Self {
        Self {
            bank,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Select a suggestion for the theme.
    ///
    /// `previous` is the suggestion committed in the immediately preceding
    /// turn (None on the first turn). It is excluded from the draw whenever
    /// the theme has more than one candidate; a singleton bucket may repeat
    /// since repetition cannot be avoided there.
    pub fn select(&mut self, theme: Theme, previous: Option<&str>) -> String {
        let candidates = self.bank.candidates(theme);
        debug_assert!(!candidates.is_empty(), "bank has no Wellness fallback");

        if candidates.len() == 1 {
            return candidates[0].clone();
        }

        let mut pool: Vec<&String> = match previous {
            Some(prev) => candidates.iter().filter(|c| c.as_str() != prev).collect(),
            None => candidates.iter().collect(),
        };
        // An external bank may list the same string several times; if the
        // exclusion drained the whole bucket, repetition beats nothing.
        if pool.is_empty() {
            pool = candidates.iter().collect();
        }
        let idx = self.rng.random_range(0..pool.len());
        pool[idx].clone()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SuggestionSelector {
        SuggestionSelector::seeded(SuggestionBank::builtin(), 42)
    }

    // ---- Bank shape ----

    #[test]
    fn test_builtin_covers_every_theme() {
        let bank = SuggestionBank::builtin();
        for theme in Theme::ALL {
            assert!(
                !bank.candidates(theme).is_empty(),
                "no candidates for {}",
                theme
            );
        }
    }

    #[test]
    fn test_builtin_wellness_bucket_has_multiple_entries() {
        let bank = SuggestionBank::builtin();
        assert!(bank.candidates(Theme::Wellness).len() >= 2);
    }

    #[test]
    fn test_candidates_fall_back_to_wellness() {
        let bank = SuggestionBank {
            entries: vec![BankEntry {
                theme: Theme::Wellness,
                suggestions: vec!["Take 3 deep breaths.".to_string()],
            }],
        };
        let c = bank.candidates(Theme::Burnout);
        assert_eq!(c, ["Take 3 deep breaths.".to_string()]);
    }

    // ---- Selection ----

    #[test]
    fn test_select_returns_candidate_of_theme() {
        let mut sel = seeded();
        let bank = SuggestionBank::builtin();
        for _ in 0..20 {
            let s = sel.select(Theme::SleepDisturbance, None);
            assert!(bank
                .candidates(Theme::SleepDisturbance)
                .iter()
                .any(|c| *c == s));
        }
    }

    #[test]
    fn test_select_never_repeats_previous_with_alternatives() {
        let mut sel = seeded();
        let prev = sel.select(Theme::Burnout, None);
        for _ in 0..50 {
            let next = sel.select(Theme::Burnout, Some(&prev));
            assert_ne!(next, prev);
        }
    }

    #[test]
    fn test_singleton_bucket_may_repeat() {
        let bank = SuggestionBank {
            entries: vec![
                BankEntry {
                    theme: Theme::Burnout,
                    suggestions: vec!["Rest.".to_string()],
                },
                BankEntry {
                    theme: Theme::Wellness,
                    suggestions: vec!["Breathe.".to_string()],
                },
            ],
        };
        let mut sel = SuggestionSelector::seeded(bank, 7);
        assert_eq!(sel.select(Theme::Burnout, Some("Rest.")), "Rest.");
    }

    #[test]
    fn test_duplicate_candidates_matching_previous_still_select() {
        let bank = SuggestionBank {
            entries: vec![
                BankEntry {
                    theme: Theme::Burnout,
                    suggestions: vec!["Rest.".to_string(), "Rest.".to_string()],
                },
                BankEntry {
                    theme: Theme::Wellness,
                    suggestions: vec!["Breathe.".to_string()],
                },
            ],
        };
        let mut sel = SuggestionSelector::seeded(bank, 7);
        assert_eq!(sel.select(Theme::Burnout, Some("Rest.")), "Rest.");
    }

    #[test]
    fn test_previous_not_in_bucket_is_harmless() {
        let mut sel = seeded();
        let s = sel.select(Theme::Wellness, Some("something from another theme"));
        assert!(!s.is_empty());
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let mut a = SuggestionSelector::seeded(SuggestionBank::builtin(), 99);
        let mut b = SuggestionSelector::seeded(SuggestionBank::builtin(), 99);
        for theme in [Theme::Burnout, Theme::Wellness, Theme::Rumination] {
            assert_eq!(a.select(theme, None), b.select(theme, None));
        }
    }

    #[test]
    fn test_all_candidates_eventually_drawn() {
        let mut sel = seeded();
        let bank = SuggestionBank::builtin();
        let candidates = bank.candidates(Theme::Wellness);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(sel.select(Theme::Wellness, None));
        }
        assert_eq!(seen.len(), candidates.len());
    }

    // ---- External bank loading ----

    #[test]
    fn test_load_bank_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(
            &path,
            r#"
[[entries]]
theme = "Burnout"
suggestions = ["Rest early tonight."]

[[entries]]
theme = "Wellness"
suggestions = ["Breathe slowly.", "Drink water."]
"#,
        )
        .unwrap();

        let bank = SuggestionBank::load(&path).unwrap();
        assert_eq!(bank.candidates(Theme::Burnout).len(), 1);
        assert_eq!(bank.candidates(Theme::Wellness).len(), 2);
        // Unlisted themes use the Wellness bucket
        assert_eq!(bank.candidates(Theme::MoodSwings).len(), 2);
    }

    #[test]
    fn test_load_bank_without_wellness_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(
            &path,
            r#"
[[entries]]
theme = "Burnout"
suggestions = ["Rest early tonight."]
"#,
        )
        .unwrap();
        assert!(SuggestionBank::load(&path).is_err());
    }

    #[test]
    fn test_bank_serde_round_trip() {
        let bank = SuggestionBank::builtin();
        let toml = toml::to_string(&bank).unwrap();
        let back: SuggestionBank = toml::from_str(&toml).unwrap();
        assert_eq!(back.entries.len(), bank.entries.len());
    }
}
