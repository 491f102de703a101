//! Scans a transcript for known menu items.
//!
//! Candidates are tried longest first. Each candidate found in the transcript
//! yields one [`MatchResult`] whose quantity comes from a nearby cardinal
//! entity or the text just before it, whose modifiers come from the text
//! around it, and whose confidence reflects whether it was heard as a whole
//! word.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::entities::{DEFAULT_MAX_DISTANCE, EntityIndex};
use crate::modifiers::ModifierExtractor;
use crate::quantity::{DEFAULT_QUANTITY, parse_quantity};
use crate::text::{FoldedText, char_len, char_slice, fold};
use crate::{MatchResult, RecognizedEntity};

mod observer;

pub use observer::{MatchObserver, QuantitySource, TracingObserver};

/// Tunables for [`ItemMatcher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Characters of context read on each side of a located item.
    #[serde(default = "MatcherConfig::default_window_radius")]
    pub window_radius: usize,

    /// How far, in characters, a cardinal entity may end before an item and
    /// still give its quantity.
    #[serde(default = "MatcherConfig::default_entity_max_distance")]
    pub entity_max_distance: usize,

    /// Confidence of an item heard as a whole word.
    #[serde(default = "MatcherConfig::default_whole_word_confidence")]
    pub whole_word_confidence: f64,

    /// Confidence of an item only found inside a longer word.
    #[serde(default = "MatcherConfig::default_substring_confidence")]
    pub substring_confidence: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            window_radius: Self::default_window_radius(),
            entity_max_distance: Self::default_entity_max_distance(),
            whole_word_confidence: Self::default_whole_word_confidence(),
            substring_confidence: Self::default_substring_confidence(),
        }
    }
}

impl MatcherConfig {
    const fn default_window_radius() -> usize {
        50
    }

    const fn default_entity_max_distance() -> usize {
        DEFAULT_MAX_DISTANCE
    }

    const fn default_whole_word_confidence() -> f64 {
        0.95
    }

    const fn default_substring_confidence() -> f64 {
        0.70
    }
}

/// Matches transcripts against candidate item names.
///
/// A matcher holds no per-scan state; one instance can serve any number of
/// scans, from any number of threads.
#[derive(Clone, Default)]
pub struct ItemMatcher {
    config: MatcherConfig,
    modifiers: ModifierExtractor,
    observer: Option<Arc<dyn MatchObserver>>,
    word_patterns: WordPatterns,
}

impl std::fmt::Debug for ItemMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemMatcher")
            .field("config", &self.config)
            .field("modifier_rules", &self.modifiers.len())
            .field("observed", &self.observer.is_some())
            .field("cached_patterns", &self.word_patterns.len())
            .finish()
    }
}

impl ItemMatcher {
    #[must_use]
    pub fn new(config: MatcherConfig, modifiers: ModifierExtractor) -> Self {
        Self {
            config,
            modifiers,
            observer: None,
            word_patterns: WordPatterns::default(),
        }
    }

    /// Attach an observer that is told about every scan.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Find the candidates mentioned in `transcript`.
    ///
    /// Results follow the candidates sorted by length, longest first, not
    /// the order items were spoken in. A candidate that is part of a longer
    /// one ("Pizza" in "Pepperoni Pizza") is matched independently. Empty
    /// candidates are ignored.
    #[must_use]
    pub fn match_items<S: AsRef<str>>(
        &self,
        transcript: &str,
        candidates: &[S],
        entities: &[RecognizedEntity],
    ) -> Vec<MatchResult> {
        let folded = FoldedText::new(transcript);

        let mut sorted: Vec<&str> = candidates
            .iter()
            .map(AsRef::as_ref)
            .filter(|candidate| !candidate.trim().is_empty())
            .collect();
        sorted.sort_by_key(|candidate| Reverse(char_len(candidate)));

        let cardinals = EntityIndex::cardinals(entities);
        self.notify(|o| o.cardinals_found(&cardinals));

        let results: Vec<MatchResult> = sorted
            .into_iter()
            .filter_map(|candidate| self.match_candidate(transcript, &folded, &cardinals, candidate))
            .collect();

        self.notify(|o| o.scan_finished(&results));
        results
    }

    fn match_candidate(
        &self,
        transcript: &str,
        folded: &FoldedText,
        cardinals: &EntityIndex<'_>,
        candidate: &str,
    ) -> Option<MatchResult> {
        let start = folded.find(&fold(candidate))?;
        let end = start + char_len(candidate);
        let radius = self.config.window_radius;

        let source = cardinals
            .find_preceding(start, self.config.entity_max_distance)
            .map_or_else(
                || QuantitySource::Window(char_slice(transcript, start.saturating_sub(radius), start)),
                QuantitySource::Entity,
            );
        let quantity = parse_quantity(source.text()).max(DEFAULT_QUANTITY);
        self.notify(|o| o.quantity_resolved(candidate, &source, quantity));

        let context = char_slice(transcript, start.saturating_sub(radius), end + radius);
        let modifiers = self.modifiers.extract(context);

        let confidence = if self.word_patterns.is_whole_word(transcript, candidate) {
            self.config.whole_word_confidence
        } else {
            self.config.substring_confidence
        };

        let result = MatchResult {
            item_name: candidate.to_string(),
            quantity,
            modifiers,
            confidence,
        };
        self.notify(|o| o.item_matched(&result));
        Some(result)
    }

    fn notify(&self, event: impl FnOnce(&dyn MatchObserver)) {
        if let Some(observer) = &self.observer {
            event(observer.as_ref());
        }
    }
}

/// Case-insensitive `\bterm\b` patterns, compiled once per candidate and
/// shared by every clone of a matcher.
///
/// `None` records a candidate whose pattern failed to build; it only ever
/// matches as a substring.
#[derive(Debug, Clone, Default)]
struct WordPatterns {
    cache: Arc<RwLock<HashMap<String, Option<Regex>>>>,
}

impl WordPatterns {
    /// Whether `term` appears anywhere in `text` between word boundaries,
    /// ignoring case.
    fn is_whole_word(&self, text: &str, term: &str) -> bool {
        self.pattern(term).is_some_and(|re| re.is_match(text))
    }

    fn pattern(&self, term: &str) -> Option<Regex> {
        let cached = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(term).cloned());
        if let Some(pattern) = cached {
            return pattern;
        }

        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
            .case_insensitive(true)
            .build()
            .ok();
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(term.to_string(), pattern.clone());
        }
        pattern
    }

    fn len(&self) -> usize {
        self.cache.read().map_or(0, |cache| cache.len())
    }
}

static DEFAULT_MATCHER: OnceLock<ItemMatcher> = OnceLock::new();

/// Match with the default configuration and modifier rules, no observer.
///
/// ```
/// use orderscribe_core::match_items;
///
/// let results = match_items("two large pizzas, no onions", &["Pizza", "Soda"], &[]);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].item_name, "Pizza");
/// assert_eq!(results[0].quantity, 2);
/// ```
#[must_use]
pub fn match_items<S: AsRef<str>>(
    transcript: &str,
    candidates: &[S],
    entities: &[RecognizedEntity],
) -> Vec<MatchResult> {
    DEFAULT_MATCHER
        .get_or_init(ItemMatcher::default)
        .match_items(transcript, candidates, entities)
}
