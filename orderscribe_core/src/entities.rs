//! Lookup of recognized cardinal entities by position.

use crate::RecognizedEntity;

/// Entity type strings that denote a number. Matched exactly.
pub const CARDINAL_TYPES: &[&str] = &["cardinal", "CARDINAL", "number"];

/// Default reach, in characters, of a cardinal entity before an item.
pub const DEFAULT_MAX_DISTANCE: usize = 50;

/// Whether an entity type denotes a cardinal number.
#[must_use]
pub fn is_cardinal_type(entity_type: &str) -> bool {
    CARDINAL_TYPES.contains(&entity_type)
}

/// The cardinal entities of one transcript, in the order they were reported.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex<'a> {
    cardinals: Vec<&'a RecognizedEntity>,
}

impl<'a> EntityIndex<'a> {
    /// Keep only the cardinal entities of `entities`.
    #[must_use]
    pub fn cardinals(entities: &'a [RecognizedEntity]) -> Self {
        Self {
            cardinals: entities
                .iter()
                .filter(|entity| is_cardinal_type(&entity.entity_type))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cardinals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cardinals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a RecognizedEntity> + '_ {
        self.cardinals.iter().copied()
    }

    /// The first cardinal, in reported order, that ends at or before
    /// `before_offset` and less than `max_distance` characters ahead of it.
    ///
    /// This is not necessarily the nearest qualifying cardinal.
    #[must_use]
    pub fn find_preceding(
        &self,
        before_offset: usize,
        max_distance: usize,
    ) -> Option<&'a RecognizedEntity> {
        self.iter().find(|entity| {
            entity.end_char <= before_offset && before_offset - entity.end_char < max_distance
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(text: &str, entity_type: &str, start: usize, end: usize) -> RecognizedEntity {
        RecognizedEntity::new(text, entity_type, start, end)
    }

    #[test]
    fn test_only_listed_types_are_cardinal() {
        assert!(is_cardinal_type("cardinal"));
        assert!(is_cardinal_type("CARDINAL"));
        assert!(is_cardinal_type("number"));
        assert!(!is_cardinal_type("Cardinal"));
        assert!(!is_cardinal_type("NUMBER"));
        assert!(!is_cardinal_type("ordinal"));
        assert!(!is_cardinal_type("money"));
    }

    #[test]
    fn test_cardinals_filter_keeps_order() {
        let entities = vec![
            entity("two", "cardinal", 0, 3),
            entity("$5", "money", 10, 12),
            entity("first", "ordinal", 14, 19),
            entity("3", "number", 20, 21),
        ];
        let index = EntityIndex::cardinals(&entities);

        assert_eq!(index.len(), 2);
        let texts: Vec<&str> = index.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "3"]);
    }

    #[test]
    fn test_find_preceding_bounds() {
        let entities = vec![entity("two", "cardinal", 6, 9)];
        let index = EntityIndex::cardinals(&entities);

        assert!(index.find_preceding(10, DEFAULT_MAX_DISTANCE).is_some());
        // Ending exactly at the offset counts.
        assert!(index.find_preceding(9, DEFAULT_MAX_DISTANCE).is_some());
        // Entity after the offset does not.
        assert!(index.find_preceding(8, DEFAULT_MAX_DISTANCE).is_none());
        // Distance must be strictly below the limit.
        assert!(index.find_preceding(58, DEFAULT_MAX_DISTANCE).is_some());
        assert!(index.find_preceding(59, DEFAULT_MAX_DISTANCE).is_none());
    }

    #[test]
    fn test_find_preceding_first_in_list_order() {
        let entities = vec![
            entity("one", "cardinal", 0, 3),
            entity("four", "cardinal", 20, 24),
        ];
        let index = EntityIndex::cardinals(&entities);

        let found = index.find_preceding(30, DEFAULT_MAX_DISTANCE);
        assert_eq!(found.map(|e| e.text.as_str()), Some("one"));
    }

    #[test]
    fn test_empty_index() {
        let index = EntityIndex::cardinals(&[]);
        assert!(index.is_empty());
        assert!(index.find_preceding(10, DEFAULT_MAX_DISTANCE).is_none());
    }
}
