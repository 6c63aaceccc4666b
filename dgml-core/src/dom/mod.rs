//! Arena-backed XML element tree
//!
//! The tree follows the mixed-content model used throughout the crate: every
//! element owns the text that precedes its first child (`text`) and the text
//! that follows its own end tag up to the next sibling (`tail`). Comments and
//! processing instructions are not represented, but the positions where they
//! interrupted a text run are kept as fragment boundaries.

mod name;
mod parser;
mod serialize;

pub use name::{ExpandedName, QName};
pub use parser::parse;
pub(crate) use serialize::SimplifiedSink;

use std::fmt;

/// Index of an element inside its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the element in document (pre-order) sequence
    pub fn index(self) -> usize {
        self.0
    }
}

/// A namespace-resolved attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written and as resolved
    pub name: QName,
    /// Unescaped attribute value
    pub value: String,
}

/// A namespace declaration (`xmlns` or `xmlns:prefix`) written on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Declared prefix, `None` for the default namespace
    pub prefix: Option<String>,
    /// Namespace URI, empty when the default namespace is undeclared
    pub uri: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    pub(crate) name: QName,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) namespaces: Vec<NamespaceDecl>,
    pub(crate) text: Option<String>,
    pub(crate) tail: Option<String>,
    pub(crate) text_breaks: Vec<usize>,
    pub(crate) tail_breaks: Vec<usize>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A parsed XML document
///
/// Elements are stored in document order, so the root is always the first
/// entry and a pre-order walk is a linear scan.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<ElementData>,
}

impl Document {
    pub(crate) fn from_elements(elements: Vec<ElementData>) -> Self {
        debug_assert!(!elements.is_empty(), "a document always has a root");
        Self { elements }
    }

    /// Parse a document from XML text
    pub fn parse(xml: &str) -> crate::Result<Self> {
        parse(xml)
    }

    /// The document element
    pub fn root(&self) -> Node<'_> {
        Node {
            doc: self,
            id: NodeId(0),
        }
    }

    /// Look up an element by id
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.elements.len()).then_some(Node { doc: self, id })
    }

    /// Number of elements in the document
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// A parsed document always has a root, so this is never true
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn data(&self, id: NodeId) -> &ElementData {
        &self.elements[id.0]
    }
}

/// Borrowed handle to one element of a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name().qualified())
            .finish()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl<'a> Node<'a> {
    fn data(&self) -> &'a ElementData {
        self.doc.data(self.id)
    }

    fn at(&self, id: NodeId) -> Node<'a> {
        Node { doc: self.doc, id }
    }

    /// Element id within the owning document
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The owning document
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Element name
    pub fn name(&self) -> &'a QName {
        &self.data().name
    }

    /// Local name without namespace or prefix
    pub fn local_name(&self) -> &'a str {
        &self.data().name.local
    }

    /// Whether the element has the given expanded name
    pub fn has_name(&self, name: &ExpandedName) -> bool {
        self.data().name.matches(name)
    }

    /// Attributes in source order
    pub fn attributes(&self) -> &'a [Attribute] {
        &self.data().attributes
    }

    /// Value of the attribute with the given expanded name
    pub fn attribute(&self, name: &ExpandedName) -> Option<&'a str> {
        self.data()
            .attributes
            .iter()
            .find(|attr| attr.name.matches(name))
            .map(|attr| attr.value.as_str())
    }

    /// Whether the attribute is present, regardless of its value
    pub fn has_attribute(&self, name: &ExpandedName) -> bool {
        self.attribute(name).is_some()
    }

    /// Namespace declarations written on this element
    pub fn namespace_declarations(&self) -> &'a [NamespaceDecl] {
        &self.data().namespaces
    }

    /// Text before the first child element
    pub fn text(&self) -> Option<&'a str> {
        self.data().text.as_deref()
    }

    /// Text after this element's end tag, before the next sibling
    pub fn tail(&self) -> Option<&'a str> {
        self.data().tail.as_deref()
    }

    /// Parent element, `None` for the root
    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| self.at(id))
    }

    /// Child elements in document order
    pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'a>> + ExactSizeIterator + 'a {
        let doc = self.doc;
        self.data()
            .children
            .iter()
            .map(move |&id| Node { doc, id })
    }

    /// Strict ancestors, nearest first
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Strict descendants in document order
    pub fn descendants(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        // Pre-order storage: the subtree is the contiguous run of elements
        // after this one whose ancestor chain passes through it.
        let doc = self.doc;
        let start = self.id.0 + 1;
        let end = self.subtree_end();
        (start..end).map(move |index| Node {
            doc,
            id: NodeId(index),
        })
    }

    fn subtree_end(&self) -> usize {
        let mut current = *self;
        loop {
            if let Some(last) = current.data().children.last() {
                current = current.at(*last);
            } else {
                return current.id.0 + 1;
            }
        }
    }

    /// Text fragments of the subtree in document order
    ///
    /// Yields this element's text, then for every child its own fragments
    /// followed by its tail. The element's own tail is not included.
    pub fn itertext(&self) -> Vec<&'a str> {
        let mut fragments = Vec::new();
        self.collect_text(&mut fragments);
        fragments
    }

    fn collect_text(&self, out: &mut Vec<&'a str>) {
        if let Some(text) = self.text() {
            push_fragments(text, &self.data().text_breaks, out);
        }
        for child in self.children() {
            child.collect_text(out);
            if let Some(tail) = child.tail() {
                push_fragments(tail, &child.data().tail_breaks, out);
            }
        }
    }

    /// Absolute location path of this element
    ///
    /// Steps use the qualified names as written. A `[k]` position predicate
    /// is added only where the parent has several children with that name.
    pub fn xpath(&self) -> String {
        let mut steps = Vec::new();
        let mut current = Some(*self);
        while let Some(node) = current {
            let qualified = node.name().qualified();
            let step = match node.parent() {
                Some(parent) => {
                    let mut position = 0;
                    let mut total = 0;
                    for sibling in parent.children() {
                        if sibling.name() == node.name() {
                            total += 1;
                            if sibling == node {
                                position = total;
                            }
                        }
                    }
                    if total > 1 {
                        format!("{qualified}[{position}]")
                    } else {
                        qualified
                    }
                }
                None => qualified,
            };
            steps.push(step);
            current = node.parent();
        }
        steps.reverse();
        format!("/{}", steps.join("/"))
    }

    /// Serialize the element as written, without its tail
    pub fn to_xml(&self) -> String {
        serialize::verbatim(*self)
    }

    /// Serialize the element with local names only and no attributes,
    /// followed by its tail
    pub fn to_simplified_xml(&self) -> String {
        let mut out = String::new();
        serialize::simplified(*self, &|_: Node<'_>| false, &mut out);
        out
    }

    /// Simplified serialization into `out`, dropping the tags of elided
    /// elements
    pub(crate) fn write_simplified_xml(
        &self,
        elide: &dyn Fn(Node<'_>) -> bool,
        out: &mut dyn SimplifiedSink,
    ) {
        serialize::simplified(*self, elide, out);
    }
}

/// Split a text run at the byte offsets where comments interrupted it
fn push_fragments<'a>(text: &'a str, breaks: &[usize], out: &mut Vec<&'a str>) {
    let mut start = 0;
    for &end in breaks {
        if end > start && end < text.len() {
            out.push(&text[start..end]);
            start = end;
        }
    }
    out.push(&text[start..]);
}

/// Iterator over the strict ancestors of a node, nearest first
pub struct Ancestors<'a> {
    next: Option<Node<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<doc xmlns:d="http://example.com/d"><d:a>one<d:b>two</d:b>three</d:a><d:a>four</d:a><c/></doc>"#;

    #[test]
    fn test_children_and_parent() {
        let doc = Document::parse(SAMPLE).unwrap();
        let root = doc.root();
        assert_eq!(root.local_name(), "doc");
        assert_eq!(root.children().len(), 3);
        assert!(root.parent().is_none());

        let first = root.children().next().unwrap();
        assert_eq!(first.parent(), Some(root));
        assert_eq!(first.name().qualified(), "d:a");
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let doc = Document::parse(SAMPLE).unwrap();
        let b = doc
            .root()
            .descendants()
            .find(|n| n.local_name() == "b")
            .unwrap();
        let names: Vec<_> = b.ancestors().map(|n| n.local_name()).collect();
        assert_eq!(names, vec!["a", "doc"]);
    }

    #[test]
    fn test_descendants_cover_subtree_only() {
        let doc = Document::parse(SAMPLE).unwrap();
        let first = doc.root().children().next().unwrap();
        let names: Vec<_> = first.descendants().map(|n| n.local_name()).collect();
        assert_eq!(names, vec!["b"]);

        let all: Vec<_> = doc.root().descendants().map(|n| n.local_name()).collect();
        assert_eq!(all, vec!["a", "b", "a", "c"]);
    }

    #[test]
    fn test_itertext_includes_child_tails() {
        let doc = Document::parse(SAMPLE).unwrap();
        let first = doc.root().children().next().unwrap();
        assert_eq!(first.itertext(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_itertext_splits_at_comments_and_instructions() {
        let doc = Document::parse(
            "<r>alpha<!-- note -->beta<b>x</b>one<?pi data?>two<!-- end --></r>",
        )
        .unwrap();
        assert_eq!(doc.root().itertext(), vec!["alpha", "beta", "x", "one", "two"]);
        assert_eq!(doc.root().text(), Some("alphabeta"));
    }

    #[test]
    fn test_xpath_positions_only_when_ambiguous() {
        let doc = Document::parse(SAMPLE).unwrap();
        let paths: Vec<_> = doc.root().descendants().map(|n| n.xpath()).collect();
        assert_eq!(
            paths,
            vec!["/doc/d:a[1]", "/doc/d:a[1]/d:b", "/doc/d:a[2]", "/doc/c"]
        );
        assert_eq!(doc.root().xpath(), "/doc");
    }

    #[test]
    fn test_attribute_lookup_by_expanded_name() {
        let doc = Document::parse(
            r#"<r xmlns:x="urn:x" structure="h1" x:structure="p"/>"#,
        )
        .unwrap();
        let root = doc.root();
        assert_eq!(root.attribute(&ExpandedName::local("structure")), Some("h1"));
        assert_eq!(
            root.attribute(&ExpandedName::new(Some("urn:x"), "structure")),
            Some("p")
        );
        assert!(!root.has_attribute(&ExpandedName::local("missing")));
    }

    #[test]
    fn test_node_lookup_by_id() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.len(), 5);
        let c = doc.root().descendants().last().unwrap();
        assert_eq!(doc.node(c.id()), Some(c));
        assert!(doc.node(NodeId(99)).is_none());
    }
}
