//! Plain-text rendering of element subtrees

use crate::dom::Node;

/// Collapse every whitespace run to a single space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render all text inside a subtree
///
/// Fragments are joined with a single space in document order. With
/// `normalize` set the result is whitespace-collapsed and trimmed; otherwise
/// the fragments are returned exactly as they appear in the source.
pub fn render_text(node: Node<'_>, normalize: bool) -> String {
    let joined = node.itertext().join(" ");
    if normalize {
        normalize_whitespace(&joined)
    } else {
        joined
    }
}
