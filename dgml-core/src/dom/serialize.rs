//! Element serialization

use super::{NamespaceDecl, Node};
use quick_xml::escape::{escape, partial_escape};

/// Serialize with names and attributes as written
///
/// Namespace declarations inherited from ancestors are re-declared on the
/// serialized element so the fragment stands on its own.
pub(super) fn verbatim(node: Node<'_>) -> String {
    let mut out = String::new();
    let inherited = inherited_declarations(node);
    write_verbatim(node, &inherited, &mut out);
    out
}

/// Destination of simplified serialization
pub(crate) trait SimplifiedSink {
    fn push_str(&mut self, text: &str);

    /// Serialization stops once the sink reports it is full
    fn is_full(&self) -> bool {
        false
    }
}

impl SimplifiedSink for String {
    fn push_str(&mut self, text: &str) {
        String::push_str(self, text);
    }
}

/// Serialize with local names only, no attributes, followed by the tail
///
/// Elements for which `elide` returns true lose their start and end tags but
/// keep their content. Empty elements are always written as `<name/>`.
pub(super) fn simplified(
    node: Node<'_>,
    elide: &dyn Fn(Node<'_>) -> bool,
    out: &mut dyn SimplifiedSink,
) {
    write_simplified(node, elide, out);
    if let Some(tail) = node.tail() {
        if !out.is_full() {
            out.push_str(&partial_escape(tail));
        }
    }
}

fn inherited_declarations<'a>(node: Node<'a>) -> Vec<&'a NamespaceDecl> {
    let own = node.namespace_declarations();
    let mut seen: Vec<Option<&str>> = own.iter().map(|d| d.prefix.as_deref()).collect();
    let mut inherited = Vec::new();
    for ancestor in node.ancestors() {
        for decl in ancestor.namespace_declarations() {
            if !seen.contains(&decl.prefix.as_deref()) {
                seen.push(decl.prefix.as_deref());
                inherited.push(decl);
            }
        }
    }
    inherited
}

fn write_declaration(decl: &NamespaceDecl, out: &mut String) {
    match &decl.prefix {
        Some(prefix) => out.push_str(&format!(" xmlns:{prefix}=\"{}\"", escape(&decl.uri))),
        None => out.push_str(&format!(" xmlns=\"{}\"", escape(&decl.uri))),
    }
}

fn write_verbatim(node: Node<'_>, inherited: &[&NamespaceDecl], out: &mut String) {
    let name = node.name().qualified();
    out.push('<');
    out.push_str(&name);
    for decl in node.namespace_declarations().iter().chain(inherited.iter().copied()) {
        write_declaration(decl, out);
    }
    for attr in node.attributes() {
        out.push_str(&format!(" {}=\"{}\"", attr.name.qualified(), escape(&attr.value)));
    }

    if node.text().is_none() && node.children().len() == 0 {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if let Some(text) = node.text() {
        out.push_str(&partial_escape(text));
    }
    for child in node.children() {
        write_verbatim(child, &[], out);
        if let Some(tail) = child.tail() {
            out.push_str(&partial_escape(tail));
        }
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn write_simplified(node: Node<'_>, elide: &dyn Fn(Node<'_>) -> bool, out: &mut dyn SimplifiedSink) {
    if out.is_full() {
        return;
    }
    let name = node.local_name();
    if node.text().is_none() && node.children().len() == 0 {
        out.push_str(&format!("<{name}/>"));
        return;
    }

    let tagged = !elide(node);
    if tagged {
        out.push_str(&format!("<{name}>"));
    }
    if let Some(text) = node.text() {
        out.push_str(&partial_escape(text));
    }
    for child in node.children() {
        write_simplified(child, elide, out);
        if out.is_full() {
            return;
        }
        if let Some(tail) = child.tail() {
            out.push_str(&partial_escape(tail));
        }
    }
    if tagged {
        out.push_str(&format!("</{name}>"));
    }
}
