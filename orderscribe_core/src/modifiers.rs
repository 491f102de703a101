//! Modifier extraction for order lines.
//!
//! Modifiers ("no onions", "extra cheese", "spicy") are found with a table of
//! case-insensitive regex rules. Each rule says what to emit for a match, so
//! the table can be extended or replaced from configuration without touching
//! the matcher.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// What a rule contributes for each match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Emission {
    /// The whole matched text, lower-cased and trimmed.
    #[default]
    WholeMatch,
    /// One capture group, lower-cased and trimmed. Matches where the group
    /// did not participate contribute nothing.
    Capture(usize),
    /// A fixed label regardless of the matched text, lower-cased like every
    /// other modifier.
    Fixed(String),
}

/// Definition of a single modifier rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierRule {
    /// Unique identifier for this rule.
    pub id: String,

    /// Regex pattern, matched case-insensitively.
    pub pattern: String,

    #[serde(default)]
    pub emission: Emission,
}

impl ModifierRule {
    #[must_use]
    pub fn new(id: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            emission: Emission::WholeMatch,
        }
    }

    #[must_use]
    pub fn with_emission(mut self, emission: Emission) -> Self {
        self.emission = emission;
        self
    }

    fn compile(&self) -> Result<CompiledRule, RuleError> {
        let regex = RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleError::InvalidPattern {
                id: self.id.clone(),
                source,
            })?;

        if let Emission::Capture(index) = self.emission {
            let groups = regex.captures_len();
            if index >= groups {
                return Err(RuleError::CaptureOutOfRange {
                    id: self.id.clone(),
                    index,
                    groups,
                });
            }
        }

        Ok(CompiledRule {
            regex,
            emission: self.emission.clone(),
        })
    }
}

/// Error building a modifier rule table.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("modifier rule `{id}` has an invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("modifier rule `{id}` emits capture {index} but its pattern has {groups} groups")]
    CaptureOutOfRange {
        id: String,
        index: usize,
        groups: usize,
    },
}

/// Phrase rules: a qualifier word followed by the word it qualifies.
const PHRASE_RULES: &[(&str, &str)] = &[
    ("no", r"no\s+(\w+)"),
    ("without", r"without\s+(\w+)"),
    ("extra", r"extra\s+(\w+)"),
    ("with", r"with\s+(\w+)"),
    ("add", r"add\s+(\w+)"),
    ("less", r"less\s+(\w+)"),
    ("more", r"more\s+(\w+)"),
];

/// Standalone keywords, each emitted as itself.
const KEYWORD_RULES: &[&str] = &["spicy", "mild", "hot", "cold", "large", "small", "medium"];

/// The built-in rule table, in the order rules are applied.
#[must_use]
pub fn default_rules() -> Vec<ModifierRule> {
    PHRASE_RULES
        .iter()
        .map(|(id, pattern)| ModifierRule::new(*id, *pattern))
        .chain(
            KEYWORD_RULES
                .iter()
                .map(|keyword| ModifierRule::new(*keyword, *keyword)),
        )
        .collect()
}

#[derive(Debug, Clone)]
struct CompiledRule {
    regex: Regex,
    emission: Emission,
}

impl CompiledRule {
    fn emit(&self, caps: &regex::Captures<'_>) -> Option<String> {
        let text = match &self.emission {
            Emission::WholeMatch => caps.get(0)?.as_str(),
            Emission::Capture(index) => caps.get(*index)?.as_str(),
            Emission::Fixed(label) => label.as_str(),
        };
        let modifier = text.to_lowercase().trim().to_string();
        (!modifier.is_empty()).then_some(modifier)
    }
}

/// Applies a compiled rule table to text windows.
#[derive(Debug, Clone)]
pub struct ModifierExtractor {
    rules: Vec<CompiledRule>,
}

impl ModifierExtractor {
    /// Compile a rule table.
    ///
    /// # Errors
    /// Returns an error if a pattern is invalid or a rule emits a capture
    /// group its pattern does not have.
    pub fn new(rules: &[ModifierRule]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .map(ModifierRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Extract the modifiers mentioned in `text`.
    ///
    /// Rules are applied in table order and every non-overlapping match of a
    /// rule contributes; repeated modifiers keep their first position.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut modifiers = Vec::new();
        let mut seen = HashSet::new();

        for rule in &self.rules {
            for caps in rule.regex.captures_iter(text) {
                if let Some(modifier) = rule.emit(&caps) {
                    if seen.insert(modifier.clone()) {
                        modifiers.push(modifier);
                    }
                }
            }
        }

        modifiers
    }
}

static DEFAULT_EXTRACTOR: OnceLock<ModifierExtractor> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Built-in rule patterns are static and known to be valid"
)]
fn default_extractor() -> &'static ModifierExtractor {
    DEFAULT_EXTRACTOR.get_or_init(|| {
        ModifierExtractor::new(&default_rules()).expect("built-in modifier rules are valid")
    })
}

impl Default for ModifierExtractor {
    fn default() -> Self {
        default_extractor().clone()
    }
}

/// Extract modifiers from `text` with the built-in rule table.
///
/// ```
/// use orderscribe_core::extract_modifiers;
///
/// assert_eq!(
///     extract_modifiers("extra cheese and spicy"),
///     vec!["extra cheese".to_string(), "spicy".to_string()]
/// );
/// ```
#[must_use]
pub fn extract_modifiers(text: &str) -> Vec<String> {
    default_extractor().extract(text)
}
