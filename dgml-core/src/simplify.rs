//! Simplified XML rendering with bounded ancestor context
//!
//! Simplified XML drops namespaces and attributes, keeps text verbatim, and
//! removes the tags of "skip" wrapper elements while keeping their content.
//! Rendering a node at `n` hierarchy levels renders one of its ancestors
//! instead, chosen by [`nth_ancestor`].

use crate::defaults;
use crate::dom::{Node, SimplifiedSink};
use tracing::trace;

/// Rendering options shared by the simplifier and the ancestor locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Collapse whitespace in the rendered XML
    pub normalize: bool,
    /// Local names of wrapper elements to elide
    pub skip_tags: Vec<String>,
    /// Maximum length of the rendered text, in characters
    pub max_text_length: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            normalize: defaults::WHITESPACE_NORMALIZE,
            skip_tags: defaults::skip_tags(),
            max_text_length: defaults::MAX_TEXT_LENGTH,
        }
    }
}

impl SimplifyOptions {
    fn skips(&self, node: Node<'_>) -> bool {
        self.skip_tags.iter().any(|tag| tag == node.local_name())
    }
}

/// Find the `n`th ancestor of `node` that fits within the text budget
///
/// Ancestors whose local name is a skip tag are passed over without being
/// counted. The walk stops at the first counted ancestor whose simplified
/// XML is longer than `max_text_length`. Returns the `n`th accepted ancestor
/// (nearest is 1), the furthest accepted one when fewer than `n` fit, and
/// `node` itself when `n` is 0 or nothing fits.
pub fn nth_ancestor<'a>(node: Node<'a>, n: usize, options: &SimplifyOptions) -> Node<'a> {
    if n == 0 {
        return node;
    }

    let mut accepted = Vec::new();
    for ancestor in node.ancestors() {
        if options.skips(ancestor) {
            continue;
        }
        if render_bounded(ancestor, options).overflowed {
            trace!(
                ancestor = ancestor.local_name(),
                max = options.max_text_length,
                "ancestor exceeds text budget, stopping walk"
            );
            break;
        }
        accepted.push(ancestor);
        if accepted.len() == n {
            break;
        }
    }

    accepted.last().copied().unwrap_or(node)
}

/// Render `node`, or its ancestor `parent_hierarchy_levels` up, as
/// simplified XML truncated to `max_text_length` characters
pub fn simplified_xml(
    node: Node<'_>,
    parent_hierarchy_levels: usize,
    options: &SimplifyOptions,
) -> String {
    let effective = nth_ancestor(node, parent_hierarchy_levels, options);
    render_bounded(effective, options).text
}

/// Simplified XML of `node` with skip tags elided, whitespace handled per
/// `options`, cut off after `max_text_length` characters
fn render_bounded(node: Node<'_>, options: &SimplifyOptions) -> BudgetWriter {
    let mut writer = BudgetWriter::new(options);
    node.write_simplified_xml(&|element: Node<'_>| options.skips(element), &mut writer);
    writer
}

/// Whitespace-aware sink that keeps at most `limit` characters
///
/// Leading and trailing whitespace never reaches `text`. With `normalize`
/// set, inner whitespace runs are collapsed to one space.
struct BudgetWriter {
    text: String,
    chars: usize,
    limit: usize,
    normalize: bool,
    pending: String,
    overflowed: bool,
}

impl BudgetWriter {
    fn new(options: &SimplifyOptions) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            limit: options.max_text_length,
            normalize: options.normalize,
            pending: String::new(),
            overflowed: false,
        }
    }

    fn emit(&mut self, c: char) {
        if self.chars == self.limit {
            self.overflowed = true;
            return;
        }
        self.text.push(c);
        self.chars += 1;
    }
}

impl SimplifiedSink for BudgetWriter {
    fn push_str(&mut self, text: &str) {
        for c in text.chars() {
            if self.overflowed {
                return;
            }
            if c.is_whitespace() {
                if self.chars > 0 {
                    self.pending.push(c);
                }
                continue;
            }
            if !self.pending.is_empty() {
                let pending = std::mem::take(&mut self.pending);
                if self.normalize {
                    self.emit(' ');
                } else {
                    for space in pending.chars() {
                        self.emit(space);
                    }
                }
            }
            self.emit(c);
        }
    }

    fn is_full(&self) -> bool {
        self.overflowed
    }
}
