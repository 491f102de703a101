#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

//! Transcript-to-order matching.
//!
//! Turns a spoken-order transcript, the names on the current menu and any
//! cardinal entities recognized upstream into quantified, modified order
//! lines with a confidence score.

use serde::{Deserialize, Serialize};

pub mod draft;
pub mod entities;
pub mod matcher;
pub mod menu;
pub mod modifiers;
pub mod quantity;
mod text;

pub use draft::{DraftConfig, DraftLine, DraftOrder, OrderLine};
pub use entities::{CARDINAL_TYPES, EntityIndex, is_cardinal_type};
pub use matcher::{
    ItemMatcher, MatchObserver, MatcherConfig, QuantitySource, TracingObserver, match_items,
};
pub use menu::{Menu, MenuItem};
pub use modifiers::{Emission, ModifierExtractor, ModifierRule, RuleError, extract_modifiers};
pub use quantity::{DEFAULT_QUANTITY, parse_quantity};

/// A span of the transcript recognized upstream as an entity.
///
/// Offsets are half-open character offsets into the transcript the entity
/// was recognized in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub start_char: usize,
    pub end_char: usize,
}

impl RecognizedEntity {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        entity_type: impl Into<String>,
        start_char: usize,
        end_char: usize,
    ) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
            start_char,
            end_char,
        }
    }
}

/// One menu item found in a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// The candidate name as supplied by the caller, not as transcribed.
    pub item_name: String,
    /// Always at least 1.
    pub quantity: u64,
    /// Lower-cased modifier phrases in first-seen order, without duplicates.
    pub modifiers: Vec<String>,
    /// 0.95 for a whole-word match, 0.70 for a substring-only match
    /// (with the default matcher configuration).
    pub confidence: f64,
}
