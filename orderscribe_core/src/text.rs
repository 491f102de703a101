//! Character-offset helpers.
//!
//! Entity spans and context windows are measured in characters, while Rust
//! strings index by byte. Everything here slices on char boundaries only, so
//! no window can split a multi-byte character.

/// Lower-case `s` one character at a time.
///
/// `str::to_lowercase` is context sensitive (final sigma); folding per char
/// keeps a transcript and a candidate folded the same way.
pub fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`th character, or `s.len()` past the end.
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// The characters `start..end` of `s`, clamped to its bounds.
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    &s[from..to.max(from)]
}

/// A case-folded copy of a text that remembers where each folded character
/// came from.
#[derive(Debug, Clone)]
pub struct FoldedText {
    folded: String,
    origin: Vec<usize>,
}

impl FoldedText {
    pub fn new(s: &str) -> Self {
        let mut folded = String::with_capacity(s.len());
        let mut origin = Vec::with_capacity(s.len());
        for (index, ch) in s.chars().enumerate() {
            for lower in ch.to_lowercase() {
                folded.push(lower);
                origin.push(index);
            }
        }
        Self { folded, origin }
    }

    /// Character offset in the original text of the first occurrence of an
    /// already folded needle.
    pub fn find(&self, needle: &str) -> Option<usize> {
        let byte = self.folded.find(needle)?;
        let folded_index = self.folded[..byte].chars().count();
        Some(
            self.origin
                .get(folded_index)
                .copied()
                .unwrap_or(self.origin.len()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_slice_clamps() {
        assert_eq!(char_slice("hello", 1, 3), "el");
        assert_eq!(char_slice("hello", 3, 99), "lo");
        assert_eq!(char_slice("hello", 7, 9), "");
        assert_eq!(char_slice("hello", 3, 1), "");
    }

    #[test]
    fn test_char_slice_multibyte() {
        assert_eq!(char_slice("crème brûlée", 0, 5), "crème");
        assert_eq!(char_slice("crème brûlée", 6, 12), "brûlée");
    }

    #[test]
    fn test_folded_find_reports_original_offset() {
        let text = FoldedText::new("Two CRÈME Brûlée");
        assert_eq!(text.find(&fold("crème")), Some(4));
        assert_eq!(text.find(&fold("BRÛLÉE")), Some(10));
        assert_eq!(text.find("tiramisu"), None);
    }

    #[test]
    fn test_fold_is_per_char() {
        assert_eq!(fold("ΣΟΦΟΣ"), "σοφοσ");
        assert_eq!(char_len("añejo"), 5);
    }
}
