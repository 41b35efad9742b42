//! Intent parser for free-text plan modification requests.
//!
//! Requests are Spanish free text ("reducir la carga 15%", "cambiar el
//! ejercicio por sentadilla goblet"). Classification walks an ordered rule
//! table and the first rule whose keyword groups all match wins:
//!
//! 1. Exercise swap
//! 2. Load reduction / 3. Load increase
//! 4. Intensity / 5. Volume, with an explicit noun
//! 6. A looser second pass over intensity and volume vocabulary
//!
//! Keyword sets are plain data so rules can be inspected and extended
//! without touching the dispatch loop.

use crate::{ModificationKind, ModificationRequest};
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Keyword tables
// ============================================================================

pub const EXERCISE_CHANGE_VERBS: &[&str] = &["cambiar"];
pub const EXERCISE_NOUNS: &[&str] = &["ejercicio"];
pub const LOAD_NOUNS: &[&str] = &["carga", "peso"];
pub const LOAD_REDUCTION_VERBS: &[&str] = &["reducir"];
pub const LOAD_INCREASE_VERBS: &[&str] = &["aumentar"];
pub const INTENSITY_NOUNS: &[&str] = &["intensidad"];
pub const VOLUME_NOUNS: &[&str] = &["volumen"];

/// Verbs whose trailing integer is taken as a reduction magnitude
pub const REDUCTION_CAPTURE_VERBS: &[&str] = &["reducir", "bajar", "menos"];
/// Verbs whose trailing integer is taken as an increase magnitude
pub const INCREASE_CAPTURE_VERBS: &[&str] = &["aumentar", "subir", "más"];

pub const INCREASE_WORDS: &[&str] = &["aumentar", "subir", "más", "incrementar"];
pub const DECREASE_WORDS: &[&str] = &["reducir", "bajar", "menos", "disminuir"];

// Second-pass vocabulary is matched on whole words, so entries are regex
// fragments rather than plain substrings.

/// Words that imply intensity without naming it
pub const LOOSE_INTENSITY_WORDS: &[&str] = &[r"intens\w*", r"dur[oa]s?", r"exigentes?", r"pesad\w*"];
/// Words that imply volume without naming it
pub const LOOSE_VOLUME_WORDS: &[&str] = &["series", r"repeticion(?:es)?", "reps"];
/// Adjectives that ask for an easier session on their own
pub const SOFTENING_WORDS: &[&str] = &[r"suaves?", r"liger[oa]s?", r"f[áa]cil(?:es)?"];

pub const DEFAULT_LOAD_REDUCTION: i32 = 10;
pub const DEFAULT_LOAD_INCREASE: i32 = 5;
pub const DEFAULT_INTENSITY_INCREASE: i32 = 5;
pub const DEFAULT_INTENSITY_DECREASE: i32 = -10;
pub const DEFAULT_VOLUME_INCREASE: i32 = 10;
pub const DEFAULT_VOLUME_DECREASE: i32 = -15;

/// `(cambiar|reemplazar) ... ejercicio ... por <name>` on the original text
static EXERCISE_NAME_POR: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)(?:cambiar|reemplazar).*?ejercicio.*?\bpor\s+(.+)$").ok()
});

/// Same shape with `con`; only tried when there is no `por`, since
/// exercise names often contain "con"
static EXERCISE_NAME_CON: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)(?:cambiar|reemplazar).*?ejercicio.*?\bcon\s+(.+)$").ok()
});

// ============================================================================
// Rule records
// ============================================================================

/// How a matched rule turns text into request fields
#[derive(Clone, Copy, Debug)]
pub enum Extractor {
    /// Capture the replacement exercise name
    ExerciseName,
    /// Capture the first integer right after one of `verbs`, times `sign`;
    /// fall back to `default` (already signed)
    Percentage {
        verbs: &'static [&'static str],
        sign: i32,
        default: i32,
    },
}

/// One ordered classification rule
#[derive(Clone, Copy, Debug)]
pub struct IntentRule {
    pub label: &'static str,
    pub kind: ModificationKind,
    /// Every group must contribute at least one keyword found in the text
    pub requires: &'static [&'static [&'static str]],
    /// Every group must match a whole word; entries are regex fragments
    pub requires_words: &'static [&'static [&'static str]],
    pub extractor: Extractor,
}

const fn percentage(verbs: &'static [&'static str], sign: i32, default: i32) -> Extractor {
    Extractor::Percentage {
        verbs,
        sign,
        default,
    }
}

/// The built-in rule table, in evaluation order
pub const DEFAULT_RULES: &[IntentRule] = &[
    IntentRule {
        label: "exercise_change",
        kind: ModificationKind::ExerciseChange,
        requires: &[EXERCISE_CHANGE_VERBS, EXERCISE_NOUNS],
        requires_words: &[],
        extractor: Extractor::ExerciseName,
    },
    IntentRule {
        label: "load_reduction",
        kind: ModificationKind::LoadReduction,
        requires: &[LOAD_REDUCTION_VERBS, LOAD_NOUNS],
        requires_words: &[],
        extractor: percentage(REDUCTION_CAPTURE_VERBS, 1, DEFAULT_LOAD_REDUCTION),
    },
    IntentRule {
        label: "load_increase",
        kind: ModificationKind::LoadIncrease,
        requires: &[LOAD_INCREASE_VERBS, LOAD_NOUNS],
        requires_words: &[],
        extractor: percentage(INCREASE_CAPTURE_VERBS, 1, DEFAULT_LOAD_INCREASE),
    },
    IntentRule {
        label: "intensity_increase",
        kind: ModificationKind::IntensityChange,
        requires: &[INTENSITY_NOUNS, INCREASE_WORDS],
        requires_words: &[],
        extractor: percentage(INCREASE_CAPTURE_VERBS, 1, DEFAULT_INTENSITY_INCREASE),
    },
    IntentRule {
        label: "intensity_decrease",
        kind: ModificationKind::IntensityChange,
        requires: &[INTENSITY_NOUNS, DECREASE_WORDS],
        requires_words: &[],
        extractor: percentage(REDUCTION_CAPTURE_VERBS, -1, DEFAULT_INTENSITY_DECREASE),
    },
    IntentRule {
        label: "volume_increase",
        kind: ModificationKind::VolumeChange,
        requires: &[VOLUME_NOUNS, INCREASE_WORDS],
        requires_words: &[],
        extractor: percentage(INCREASE_CAPTURE_VERBS, 1, DEFAULT_VOLUME_INCREASE),
    },
    IntentRule {
        label: "volume_decrease",
        kind: ModificationKind::VolumeChange,
        requires: &[VOLUME_NOUNS, DECREASE_WORDS],
        requires_words: &[],
        extractor: percentage(REDUCTION_CAPTURE_VERBS, -1, DEFAULT_VOLUME_DECREASE),
    },
    // Second pass: looser vocabulary, same defaults
    IntentRule {
        label: "loose_softening",
        kind: ModificationKind::IntensityChange,
        requires: &[],
        requires_words: &[SOFTENING_WORDS],
        extractor: percentage(REDUCTION_CAPTURE_VERBS, -1, DEFAULT_INTENSITY_DECREASE),
    },
    IntentRule {
        label: "loose_intensity_increase",
        kind: ModificationKind::IntensityChange,
        requires: &[INCREASE_WORDS],
        requires_words: &[LOOSE_INTENSITY_WORDS],
        extractor: percentage(INCREASE_CAPTURE_VERBS, 1, DEFAULT_INTENSITY_INCREASE),
    },
    IntentRule {
        label: "loose_intensity_decrease",
        kind: ModificationKind::IntensityChange,
        requires: &[DECREASE_WORDS],
        requires_words: &[LOOSE_INTENSITY_WORDS],
        extractor: percentage(REDUCTION_CAPTURE_VERBS, -1, DEFAULT_INTENSITY_DECREASE),
    },
    IntentRule {
        label: "loose_volume_increase",
        kind: ModificationKind::VolumeChange,
        requires: &[INCREASE_WORDS],
        requires_words: &[LOOSE_VOLUME_WORDS],
        extractor: percentage(INCREASE_CAPTURE_VERBS, 1, DEFAULT_VOLUME_INCREASE),
    },
    IntentRule {
        label: "loose_volume_decrease",
        kind: ModificationKind::VolumeChange,
        requires: &[DECREASE_WORDS],
        requires_words: &[LOOSE_VOLUME_WORDS],
        extractor: percentage(REDUCTION_CAPTURE_VERBS, -1, DEFAULT_VOLUME_DECREASE),
    },
];

// ============================================================================
// Parser
// ============================================================================

struct CompiledRule {
    rule: IntentRule,
    /// One pattern per `requires_words` group; `None` never matches
    words: Vec<Option<Regex>>,
    /// Present for percentage rules; `None` means the capture never succeeds
    capture: Option<Regex>,
}

impl CompiledRule {
    fn new(rule: IntentRule) -> Self {
        let capture = match rule.extractor {
            Extractor::Percentage { verbs, .. } => {
                let alternation = verbs
                    .iter()
                    .map(|v| regex::escape(v))
                    .collect::<Vec<_>>()
                    .join("|");
                Regex::new(&format!(r"(?:{})\s+(\d+)", alternation)).ok()
            }
            Extractor::ExerciseName => None,
        };
        let words = rule
            .requires_words
            .iter()
            .map(|group| Regex::new(&format!(r"\b(?:{})\b", group.join("|"))).ok())
            .collect();
        Self {
            rule,
            words,
            capture,
        }
    }

    /// Whether this rule applies to already lower-cased text
    fn matches(&self, lowered: &str) -> bool {
        let keywords = self
            .rule
            .requires
            .iter()
            .all(|group| group.iter().any(|word| lowered.contains(word)));

        keywords
            && self
                .words
                .iter()
                .all(|re| re.as_ref().is_some_and(|re| re.is_match(lowered)))
    }

    fn extract(&self, lowered: &str, original: &str) -> ModificationRequest {
        let request = ModificationRequest::new(self.rule.kind).with_details(original);

        match self.rule.extractor {
            Extractor::ExerciseName => match capture_exercise_name(original) {
                Some(name) => request.with_exercise_name(name),
                None => request,
            },
            Extractor::Percentage { sign, default, .. } => {
                let captured = self
                    .capture
                    .as_ref()
                    .and_then(|re| re.captures(lowered))
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| m.as_str().parse::<i32>().ok());

                let value = match captured {
                    Some(magnitude) => sign * magnitude,
                    None => default,
                };
                request.with_value(value)
            }
        }
    }
}

fn capture_exercise_name(original: &str) -> Option<String> {
    let caps = [&*EXERCISE_NAME_POR, &*EXERCISE_NAME_CON]
        .into_iter()
        .flatten()
        .find_map(|pattern| pattern.captures(original))?;
    let name = caps
        .get(1)?
        .as_str()
        .trim()
        .trim_end_matches(['.', '!', '?', ','])
        .trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Classifies free text into a [`ModificationRequest`]
pub struct IntentParser {
    rules: Vec<CompiledRule>,
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentParser {
    /// Parser over [`DEFAULT_RULES`]
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.iter().copied())
    }

    /// Parser over a custom ordered rule table
    pub fn with_rules(rules: impl IntoIterator<Item = IntentRule>) -> Self {
        Self {
            rules: rules.into_iter().map(CompiledRule::new).collect(),
        }
    }

    /// Append a rule after the existing ones
    pub fn push_rule(&mut self, rule: IntentRule) {
        self.rules.push(CompiledRule::new(rule));
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> impl Iterator<Item = &IntentRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Classify a request; first matching rule wins, `none` otherwise
    pub fn classify(&self, text: &str) -> ModificationRequest {
        let original = text.trim();
        let lowered = original.to_lowercase();

        for compiled in &self.rules {
            if compiled.matches(&lowered) {
                tracing::debug!("Intent rule '{}' matched", compiled.rule.label);
                return compiled.extract(&lowered, original);
            }
        }

        tracing::debug!("No intent rule matched: {:?}", original);
        ModificationRequest::none()
    }
}
