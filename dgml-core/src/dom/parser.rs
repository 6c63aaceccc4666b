//! Tree construction from `quick-xml` events

use super::{Attribute, Document, ElementData, NamespaceDecl, NodeId, QName};
use crate::error::{CoreError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse XML text into a [`Document`]
pub fn parse(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::default();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(CoreError::Parse(format!(
                    "{e} (at byte {})",
                    reader.buffer_position()
                )))
            }
        };
        match event {
            Event::Start(start) => builder.open(&start)?,
            Event::Empty(start) => {
                builder.open(&start)?;
                builder.close()?;
            }
            Event::End(_) => builder.close()?,
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| CoreError::Parse(e.to_string()))?;
                builder.push_text(&text)?;
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)
                    .map_err(|e| CoreError::Encoding(e.to_string()))?;
                builder.push_text(text)?;
            }
            Event::Comment(_) | Event::PI(_) => builder.break_text(),
            Event::Eof => break,
            // Declarations and doctypes carry no content for the tree.
            _ => {}
        }
    }

    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    elements: Vec<ElementData>,
    open: Vec<NodeId>,
    scopes: Vec<Vec<NamespaceDecl>>,
}

impl TreeBuilder {
    fn open(&mut self, start: &BytesStart<'_>) -> Result<()> {
        if self.open.is_empty() && !self.elements.is_empty() {
            return Err(CoreError::Parse(
                "document has more than one root element".to_string(),
            ));
        }

        let mut declarations = Vec::new();
        let mut raw_attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| CoreError::Parse(e.to_string()))?;
            let key = utf8(attr.key.as_ref())?;
            let value = attr
                .unescape_value()
                .map_err(|e| CoreError::Parse(e.to_string()))?
                .into_owned();
            if key == "xmlns" {
                declarations.push(NamespaceDecl {
                    prefix: None,
                    uri: value,
                });
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                declarations.push(NamespaceDecl {
                    prefix: Some(prefix.to_string()),
                    uri: value,
                });
            } else {
                raw_attributes.push((key.to_string(), value));
            }
        }
        self.scopes.push(declarations.clone());

        let element_name = utf8(start.name().as_ref())?.to_string();
        let name = self.resolve(&element_name, true)?;
        let attributes = raw_attributes
            .into_iter()
            .map(|(key, value)| {
                Ok(Attribute {
                    name: self.resolve(&key, false)?,
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let id = NodeId(self.elements.len());
        let parent = self.open.last().copied();
        if let Some(parent) = parent {
            self.elements[parent.0].children.push(id);
        }
        trace!(element = %element_name, index = id.0, "open element");
        self.elements.push(ElementData {
            name,
            attributes,
            namespaces: declarations,
            text: None,
            tail: None,
            text_breaks: Vec::new(),
            tail_breaks: Vec::new(),
            parent,
            children: Vec::new(),
        });
        self.open.push(id);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.scopes.pop();
        self.open
            .pop()
            .map(|_| ())
            .ok_or_else(|| CoreError::Parse("unexpected end tag".to_string()))
    }

    /// The text slot new character data is appended to, with its breaks
    fn active_slot(&mut self) -> Option<(&mut Option<String>, &mut Vec<usize>)> {
        let current = *self.open.last()?;
        let last_child = self.elements[current.0].children.last().copied();
        Some(match last_child {
            Some(child) => {
                let element = &mut self.elements[child.0];
                (&mut element.tail, &mut element.tail_breaks)
            }
            None => {
                let element = &mut self.elements[current.0];
                (&mut element.text, &mut element.text_breaks)
            }
        })
    }

    fn push_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        match self.active_slot() {
            Some((slot, _)) => {
                slot.get_or_insert_with(String::new).push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(CoreError::Parse(
                "text content outside the root element".to_string(),
            )),
        }
    }

    /// Mark the end of the current text run
    fn break_text(&mut self) {
        if let Some((Some(slot), breaks)) = self.active_slot() {
            let offset = slot.len();
            if offset > 0 && breaks.last() != Some(&offset) {
                breaks.push(offset);
            }
        }
    }

    fn finish(self) -> Result<Document> {
        if let Some(&unclosed) = self.open.last() {
            return Err(CoreError::Parse(format!(
                "unclosed element <{}>",
                self.elements[unclosed.0].name.qualified()
            )));
        }
        if self.elements.is_empty() {
            return Err(CoreError::Parse("document has no root element".to_string()));
        }
        Ok(Document::from_elements(self.elements))
    }

    /// Resolve a raw name against the declarations in scope
    ///
    /// Unprefixed attributes are never in a namespace; unprefixed elements
    /// take the innermost default namespace.
    fn resolve(&self, raw: &str, is_element: bool) -> Result<QName> {
        let (prefix, local) = match raw.split_once(':') {
            Some((prefix, local)) => (Some(prefix), local),
            None => (None, raw),
        };

        let namespace = match prefix {
            Some("xml") => Some(XML_NAMESPACE.to_string()),
            Some(prefix) => Some(self.lookup(Some(prefix)).ok_or_else(|| {
                CoreError::Parse(format!("undeclared namespace prefix '{prefix}' in <{raw}>"))
            })?),
            None if is_element => self.lookup(None).filter(|uri| !uri.is_empty()),
            None => None,
        };

        Ok(QName {
            namespace,
            prefix: prefix.map(str::to_string),
            local: local.to_string(),
        })
    }

    fn lookup(&self, prefix: Option<&str>) -> Option<String> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|decl| decl.prefix.as_deref() == prefix)
            .map(|decl| decl.uri.clone())
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| CoreError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ExpandedName;

    #[test]
    fn test_text_and_tail_placement() {
        let doc = parse("<root> Hello  <child>World!</child> after</root>").unwrap();
        let root = doc.root();
        assert_eq!(root.text(), Some(" Hello  "));
        let child = root.children().next().unwrap();
        assert_eq!(child.text(), Some("World!"));
        assert_eq!(child.tail(), Some(" after"));
        assert_eq!(root.tail(), None);
    }

    #[test]
    fn test_default_and_prefixed_namespaces() {
        let doc = parse(
            r#"<root xmlns="http://test.com" xmlns:x="urn:x"><x:a/><b xmlns=""/></root>"#,
        )
        .unwrap();
        let root = doc.root();
        assert!(root.has_name(&ExpandedName::new(Some("http://test.com"), "root")));
        let mut children = root.children();
        let a = children.next().unwrap();
        assert!(a.has_name(&ExpandedName::new(Some("urn:x"), "a")));
        assert_eq!(a.name().prefix.as_deref(), Some("x"));
        let b = children.next().unwrap();
        assert!(b.has_name(&ExpandedName::local("b")));
    }

    #[test]
    fn test_namespace_declarations_are_not_attributes() {
        let doc = parse(r#"<root xmlns:x="urn:x" attr="value"/>"#).unwrap();
        let root = doc.root();
        assert_eq!(root.attributes().len(), 1);
        assert_eq!(root.namespace_declarations().len(), 1);
    }

    #[test]
    fn test_entities_and_cdata_are_unescaped() {
        let doc = parse("<r a=\"1 &amp; 2\">x &lt; y<![CDATA[<raw>]]></r>").unwrap();
        let root = doc.root();
        assert_eq!(root.attribute(&ExpandedName::local("a")), Some("1 & 2"));
        assert_eq!(root.text(), Some("x < y<raw>"));
    }

    #[test]
    fn test_comments_and_declaration_are_dropped() {
        let doc = parse("<?xml version=\"1.0\"?>\n<!-- c --><r>a<!-- inner -->b</r>\n").unwrap();
        assert_eq!(doc.root().text(), Some("ab"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(matches!(parse("<a><b></a>"), Err(CoreError::Parse(_))));
        assert!(matches!(parse("<a>"), Err(CoreError::Parse(_))));
        assert!(matches!(parse(""), Err(CoreError::Parse(_))));
        assert!(matches!(parse("<a/><b/>"), Err(CoreError::Parse(_))));
        assert!(matches!(parse("<p:a/>"), Err(CoreError::Parse(_))));
        assert!(matches!(parse("<a/>trailing"), Err(CoreError::Parse(_))));
    }
}
