//! Node types for the target document tree.
//!
//! This module provides `Element`, `Node`, `Text`, and `Document`. The
//! tree mirrors WordprocessingML: qualified tag names, ordered attributes
//! and mixed element/text children.

mod element;
mod text;
mod document;

pub use element::Element;
pub use text::Text;
pub use document::{Document, ElementIterator, NodePath, Relationships, DEFAULT_PAGE_WIDTH};

use smallvec::SmallVec;

/// Node in a document tree - either Element or Text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
}

impl Node {
    /// Check if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get as element reference.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(&**e),
            _ => None,
        }
    }

    /// Get as mutable element reference.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(&mut **e),
            _ => None,
        }
    }

    /// Get as text reference.
    #[inline]
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Check if this is an element with the given tag.
    #[inline]
    pub fn is_tag(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|e| e.tag == tag)
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 8]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_new() {
        let elem = Element::new("w:p");
        assert_eq!(elem.tag, "w:p");
        assert!(elem.is_empty());
    }

    #[test]
    fn test_element_attrs() {
        let mut elem = Element::new("w:pStyle");
        elem.set_attr("w:val", "Caption");

        assert_eq!(elem.get_attr("w:val"), Some("Caption"));
        assert_eq!(elem.val(), Some("Caption"));
        assert!(elem.has_attr("w:val"));
        assert!(!elem.has_attr("w:type"));
    }

    #[test]
    fn test_element_builder() {
        let elem = Element::new("w:p")
            .child(Element::new("w:pPr").child(Element::with_val("w:pStyle", "Heading1")))
            .child(Element::new("w:r").child(Element::new("w:t").text("Hello")));

        assert_eq!(elem.len(), 2);
        assert_eq!(elem.text_content(), "Hello");
        let style = elem
            .find_child("w:pPr")
            .and_then(|p| p.find_child("w:pStyle"))
            .and_then(Element::val);
        assert_eq!(style, Some("Heading1"));
    }

    #[test]
    fn test_node_accessors() {
        let node: Node = Element::new("w:tbl").into();
        assert!(node.is_element());
        assert!(node.is_tag("w:tbl"));
        assert!(!node.is_tag("w:p"));

        let node: Node = Text::new("x").into();
        assert!(node.is_text());
        assert_eq!(node.as_text().map(|t| t.content.as_str()), Some("x"));
    }

    #[test]
    fn test_document_find() {
        let doc = Document::from_body(
            Element::new("w:body")
                .child(Element::new("w:p").child(Element::with_val("w:pStyle", "Title")))
                .child(Element::new("w:tbl")),
        );

        let style = doc.find_element(|e| e.tag == "w:pStyle").unwrap();
        assert_eq!(style.val(), Some("Title"));
        assert!(doc.find_element(|e| e.tag == "w:tc").is_none());
        assert_eq!(doc.find_all(|e| e.tag.starts_with("w:")).len(), 5);
    }

    #[test]
    fn test_document_paths() {
        let mut doc = Document::from_body(
            Element::new("w:body")
                .child(Element::new("w:p"))
                .child(Element::new("w:tbl").child(Element::new("w:tr"))),
        );

        let path = doc.find_path(|e| e.tag == "w:tr").unwrap();
        assert_eq!(path.as_slice(), &[0, 1, 0]);
        assert_eq!(doc.element_at(&path).map(|e| e.tag.as_str()), Some("w:tr"));

        doc.element_at_mut(&path).unwrap().push_elem(Element::new("w:tc"));
        assert!(doc.any(|e| e.tag == "w:tc"));
    }

    #[test]
    fn test_elements_iterator_order() {
        let doc = Document::from_body(
            Element::new("w:body")
                .child(Element::new("w:p").child(Element::new("w:r")))
                .child(Element::new("w:tbl")),
        );

        let tags: Vec<_> = doc.iter_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["w:document", "w:body", "w:p", "w:r", "w:tbl"]);
    }
}
