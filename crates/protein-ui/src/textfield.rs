//! Append-only editing for text fields: characters go on the end, Delete takes
//! the last grapheme off.

use unicode_segmentation::UnicodeSegmentation;

/// Byte index where the last grapheme cluster starts (0 for empty text).
fn last_grapheme_boundary(text: &str) -> usize {
    text.grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Removes the last grapheme cluster. Returns false if `text` was empty.
pub fn delete_backward(text: &mut String) -> bool {
    if text.is_empty() {
        return false;
    }
    let at = last_grapheme_boundary(text);
    text.truncate(at);
    true
}

/// Appends a typed character. Control characters never make it into a field.
pub fn insert_char(text: &mut String, c: char) -> bool {
    if c.is_control() {
        return false;
    }
    text.push(c);
    true
}
