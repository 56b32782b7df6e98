//! Element type - host-format elements with ordered attributes
//!
//! The core building block of the document tree.

use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt, Tag, VAL};

use super::{Children, Node, Text};

// =============================================================================
// Element
// =============================================================================

/// Document element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified tag name
    pub tag: Tag,
    /// Element attributes
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an empty element
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: SmallVec::new(),
        }
    }

    /// Create a leaf element carrying a single `w:val` attribute
    pub fn with_val(tag: impl Into<Tag>, val: impl Into<String>) -> Self {
        Self::new(tag).attr(VAL, val)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Add an attribute (builder)
    pub fn attr(mut self, name: impl Into<Tag>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element (builder)
    pub fn child(mut self, elem: Element) -> Self {
        self.push_elem(elem);
        self
    }

    /// Append a text child (builder)
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.push_text(content);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// Set attribute value (update if exists, add if not)
    pub fn set_attr(&mut self, name: impl Into<Tag>, value: impl Into<String>) {
        self.attrs.set_attr(name, value);
    }

    /// Remove attribute by name, returning the old value if it existed
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove_attr(name)
    }

    /// Check if attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(name)
    }

    /// Value of the `w:val` attribute
    pub fn val(&self) -> Option<&str> {
        self.get_attr(VAL)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a child element
    pub fn push_elem(&mut self, elem: Element) {
        self.children.push(Node::from(elem));
    }

    /// Append a text child
    pub fn push_text(&mut self, content: impl Into<String>) {
        self.children.push(Node::Text(Text::new(content)));
    }

    /// Append any node
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Insert a child element at `index`
    pub fn insert_elem(&mut self, index: usize, elem: Element) {
        self.children.insert(index, Node::from(elem));
    }

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node types)
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// First child element
    pub fn first_child(&self) -> Option<&Element> {
        self.children_elements().next()
    }

    /// First direct child element with the given tag
    pub fn find_child(&self, tag: &str) -> Option<&Element> {
        self.children_elements().find(|e| e.tag == tag)
    }

    /// First direct child element with the given tag (mutable)
    pub fn find_child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children_elements_mut().find(|e| e.tag == tag)
    }

    /// Position of the first direct child element with the given tag
    pub fn position_of(&self, tag: &str) -> Option<usize> {
        self.children.iter().position(|n| n.is_tag(tag))
    }

    /// Iterate over child element references
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| n.as_element())
    }

    /// Iterate over child element mutable references
    pub fn children_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| n.as_element_mut())
    }

    /// Check if any direct child element has the given tag
    pub fn has_child(&self, tag: &str) -> bool {
        self.find_child(tag).is_some()
    }

    /// Get text content of this element (concatenated from all text nodes)
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(&t.content),
                Node::Element(e) => e.collect_text(buf),
            }
        }
    }

    /// Check if any descendant (or this element) matches the predicate
    pub fn contains<F>(&self, predicate: &F) -> bool
    where
        F: Fn(&Element) -> bool,
    {
        predicate(self) || self.children_elements().any(|c| c.contains(predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_basics() {
        let elem = Element::new("w:tc");
        assert_eq!(elem.tag, "w:tc");
        assert!(elem.is_empty());
        assert_eq!(elem.len(), 0);
    }

    #[test]
    fn test_position_and_insert() {
        let mut body = Element::new("w:body")
            .child(Element::new("w:p"))
            .child(Element::new("w:sectPr"));
        assert_eq!(body.position_of("w:sectPr"), Some(1));

        body.insert_elem(1, Element::new("w:tbl"));
        assert_eq!(body.position_of("w:tbl"), Some(1));
        assert_eq!(body.position_of("w:sectPr"), Some(2));
    }

    #[test]
    fn test_contains_descendant() {
        let p = Element::new("w:p").child(Element::new("w:r").child(Element::new("w:br")));
        assert!(p.contains(&|e: &Element| e.tag == "w:br"));
        assert!(!p.contains(&|e: &Element| e.tag == "w:drawing"));
    }
}
