//! Tag and structure-attribute helpers

use crate::dom::{ExpandedName, Node};

/// Local name of a node, or an empty string when there is no node
pub fn clean_tag<'a>(node: Option<Node<'a>>) -> &'a str {
    node.map(|n| n.local_name()).unwrap_or("")
}

/// Whether the node itself carries the structure attribute
pub fn is_structural(node: Node<'_>, key: &ExpandedName) -> bool {
    node.has_attribute(key)
}

/// Whether any descendant, at any depth, carries the structure attribute
pub fn has_structural_descendant(node: Node<'_>, key: &ExpandedName) -> bool {
    node.descendants().any(|d| d.has_attribute(key))
}

/// Whether any strict ancestor carries the structure attribute
pub fn is_descendant_of_structural(node: Node<'_>, key: &ExpandedName) -> bool {
    node.ancestors().any(|a| a.has_attribute(key))
}

/// Structure label of the node, empty when unmarked
pub fn structure_label<'a>(node: Node<'a>, key: &ExpandedName) -> &'a str {
    node.attribute(key).unwrap_or("")
}
