//! Draft orders built from match results.
//!
//! Matches are resolved back to menu items and presented for confirmation.
//! Confident matches start out confirmed; the rest wait for the customer.

use serde::{Deserialize, Serialize};

use crate::MatchResult;
use crate::menu::{Menu, MenuItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Lines whose confidence is strictly above this start out confirmed.
    #[serde(default = "DraftConfig::default_auto_confirm_threshold")]
    pub auto_confirm_threshold: f64,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            auto_confirm_threshold: Self::default_auto_confirm_threshold(),
        }
    }
}

impl DraftConfig {
    const fn default_auto_confirm_threshold() -> f64 {
        0.8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    pub menu_item: MenuItem,
    pub quantity: u64,
    pub modifiers: Vec<String>,
    pub confidence: f64,
    pub confirmed: bool,
}

/// A confirmed line, ready to be added to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u64,
    pub unit_price: f64,
    /// Modifiers joined with ", ".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftOrder {
    lines: Vec<DraftLine>,
}

impl DraftOrder {
    /// Resolve `matches` against `menu`, keeping their order.
    ///
    /// Matches naming no menu item are dropped.
    #[must_use]
    pub fn from_matches(menu: &Menu, matches: Vec<MatchResult>, config: &DraftConfig) -> Self {
        let lines = matches
            .into_iter()
            .filter_map(|result| {
                let menu_item = menu.find_by_name(&result.item_name)?.clone();
                Some(DraftLine {
                    menu_item,
                    quantity: result.quantity,
                    modifiers: result.modifiers,
                    confidence: result.confidence,
                    confirmed: result.confidence > config.auto_confirm_threshold,
                })
            })
            .collect();

        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Flip a line between confirmed and unconfirmed.
    ///
    /// Returns false if there is no line at `index`.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.lines.get_mut(index).is_some_and(|line| {
            line.confirmed = !line.confirmed;
            true
        })
    }

    /// Change a line's quantity by `delta`, never going below 1.
    ///
    /// Returns false if there is no line at `index`.
    pub fn adjust_quantity(&mut self, index: usize, delta: i64) -> bool {
        self.lines.get_mut(index).is_some_and(|line| {
            let step = delta.unsigned_abs();
            line.quantity = if delta >= 0 {
                line.quantity.saturating_add(step)
            } else {
                line.quantity.saturating_sub(step).max(1)
            };
            true
        })
    }

    /// The confirmed lines, in draft order.
    #[must_use]
    pub fn confirmed_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .filter(|line| line.confirmed)
            .map(|line| OrderLine {
                menu_item_id: line.menu_item.id.clone(),
                name: line.menu_item.name.clone(),
                quantity: line.quantity,
                unit_price: line.menu_item.price,
                notes: (!line.modifiers.is_empty()).then(|| line.modifiers.join(", ")),
            })
            .collect()
    }

    /// Price of the confirmed lines.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.confirmed_lines().iter().map(OrderLine::line_total).sum()
    }
}
