//! Hooks for watching a scan without changing its result.

use tracing::debug;

use crate::entities::EntityIndex;
use crate::{MatchResult, RecognizedEntity};

/// Where a matched item's quantity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantitySource<'a> {
    /// A cardinal entity ending shortly before the item.
    Entity(&'a RecognizedEntity),
    /// The transcript text immediately before the item.
    Window(&'a str),
}

impl QuantitySource<'_> {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity(_) => "entity",
            Self::Window(_) => "window",
        }
    }

    /// The text the quantity was parsed from.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Entity(entity) => &entity.text,
            Self::Window(window) => window,
        }
    }
}

/// Receives events from [`ItemMatcher`](super::ItemMatcher) while it scans.
///
/// Every method defaults to doing nothing.
pub trait MatchObserver: Send + Sync {
    /// Called once per scan with the cardinal entities considered.
    fn cardinals_found(&self, _cardinals: &EntityIndex<'_>) {}

    /// Called for each located item once its quantity is known.
    fn quantity_resolved(&self, _item_name: &str, _source: &QuantitySource<'_>, _quantity: u64) {}

    /// Called for each emitted result.
    fn item_matched(&self, _result: &MatchResult) {}

    /// Called once per scan with the full result.
    fn scan_finished(&self, _results: &[MatchResult]) {}
}

/// Forwards scan events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn cardinals_found(&self, cardinals: &EntityIndex<'_>) {
        let texts: Vec<&str> = cardinals.iter().map(|e| e.text.as_str()).collect();
        debug!(count = cardinals.len(), ?texts, "Cardinal entities found");
    }

    fn quantity_resolved(&self, item_name: &str, source: &QuantitySource<'_>, quantity: u64) {
        debug!(
            item = item_name,
            source = source.as_str(),
            text = source.text(),
            quantity,
            "Resolved quantity"
        );
    }

    fn item_matched(&self, result: &MatchResult) {
        debug!(
            item = %result.item_name,
            quantity = result.quantity,
            modifiers = ?result.modifiers,
            confidence = result.confidence,
            "Matched item"
        );
    }

    fn scan_finished(&self, results: &[MatchResult]) {
        debug!(matched = results.len(), "Scan finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_source_text() {
        let entity = RecognizedEntity::new("two", "cardinal", 0, 3);
        let source = QuantitySource::Entity(&entity);
        assert_eq!(source.as_str(), "entity");
        assert_eq!(source.text(), "two");

        let source = QuantitySource::Window("I'd like three ");
        assert_eq!(source.as_str(), "window");
        assert_eq!(source.text(), "I'd like three ");
    }
}
