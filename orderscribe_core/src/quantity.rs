//! Quantity parsing for short spans of spoken-order text.
//!
//! A quantity is either the first run of digits in the span or, failing that,
//! the first English number word from a fixed vocabulary.

use regex::Regex;
use std::sync::OnceLock;

/// Quantity assumed when a span names no number at all.
pub const DEFAULT_QUANTITY: u64 = 1;

/// An entry of the number-word vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberWord {
    pub word: &'static str,
    pub value: u64,
    /// Only match when not embedded in a longer word.
    pub whole_word: bool,
}

impl NumberWord {
    const fn substring(word: &'static str, value: u64) -> Self {
        Self {
            word,
            value,
            whole_word: false,
        }
    }

    const fn article(word: &'static str) -> Self {
        Self {
            word,
            value: 1,
            whole_word: true,
        }
    }
}

/// Number words in lookup order. The first entry found in the text wins.
pub const NUMBER_WORDS: &[NumberWord] = &[
    NumberWord::substring("one", 1),
    NumberWord::article("a"),
    NumberWord::article("an"),
    NumberWord::substring("two", 2),
    NumberWord::substring("couple", 2),
    NumberWord::substring("three", 3),
    NumberWord::substring("four", 4),
    NumberWord::substring("five", 5),
    NumberWord::substring("six", 6),
    NumberWord::substring("seven", 7),
    NumberWord::substring("eight", 8),
    NumberWord::substring("nine", 9),
    NumberWord::substring("ten", 10),
];

static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
static WHOLE_WORDS: OnceLock<Vec<Option<Regex>>> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn digit_run() -> &'static Regex {
    DIGIT_RUN.get_or_init(|| {
        Regex::new(r"[0-9]+").expect("Static regex pattern is guaranteed to be valid")
    })
}

/// One `\bword\b` pattern per whole-word entry of [`NUMBER_WORDS`], by index.
#[expect(
    clippy::expect_used,
    reason = "Patterns are built from escaped static words"
)]
fn whole_word_patterns() -> &'static [Option<Regex>] {
    WHOLE_WORDS.get_or_init(|| {
        NUMBER_WORDS
            .iter()
            .map(|entry| {
                entry.whole_word.then(|| {
                    Regex::new(&format!(r"\b{}\b", regex::escape(entry.word)))
                        .expect("Escaped word pattern is guaranteed to be valid")
                })
            })
            .collect()
    })
}

/// Extract a quantity from `text`.
///
/// The first digit run wins over any number word; digit runs too large for a
/// `u64` saturate. Returns [`DEFAULT_QUANTITY`] when nothing matches.
///
/// ```
/// use orderscribe_core::parse_quantity;
///
/// assert_eq!(parse_quantity("order 2 for table 10"), 2);
/// assert_eq!(parse_quantity("three pizzas"), 3);
/// assert_eq!(parse_quantity("pizza"), 1);
/// ```
#[must_use]
pub fn parse_quantity(text: &str) -> u64 {
    if let Some(run) = digit_run().find(text) {
        return run.as_str().parse().unwrap_or(u64::MAX);
    }

    let lower = text.to_lowercase();
    NUMBER_WORDS
        .iter()
        .zip(whole_word_patterns())
        .find(|&(entry, pattern)| {
            pattern
                .as_ref()
                .map_or_else(|| lower.contains(entry.word), |re| re.is_match(&lower))
        })
        .map_or(DEFAULT_QUANTITY, |(entry, _)| entry.value)
}
