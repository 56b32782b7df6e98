//! Document type and related utilities
//!
//! The root container for the target tree, with query, path addressing
//! and traversal APIs, plus the document-level parts the composers touch:
//! the numbering definitions and the hyperlink relationship table.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::attr::AttrsExt;
use crate::collab::HyperlinkAllocator;
use crate::error::{DocfillError, DocfillResult};

use super::Element;

/// Writable width in twips used when the document has no section properties.
pub const DEFAULT_PAGE_WIDTH: u32 = 11906;

/// Child-index path from the document root to an element.
///
/// Indices count every child node, text included. A path is only valid
/// until the next structural mutation of the tree.
pub type NodePath = SmallVec<[usize; 8]>;

// =============================================================================
// Document
// =============================================================================

/// Target document: main part, numbering part and relationships
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Main part root (`w:document`)
    pub root: Element,
    /// Numbering definitions part (`w:numbering`), if the document has one
    pub numbering: Option<Element>,
    /// Hyperlink relationships owned by the main part
    pub relationships: Relationships,
}

impl Document {
    /// Create a document from a main part root
    pub fn new(root: Element) -> Self {
        Self {
            root,
            numbering: None,
            relationships: Relationships::default(),
        }
    }

    /// Create a document wrapping a `w:body` element
    pub fn from_body(body: Element) -> Self {
        Self::new(Element::new("w:document").child(body))
    }

    /// Attach an existing numbering part
    pub fn with_numbering(mut self, numbering: Element) -> Self {
        self.numbering = Some(numbering);
        self
    }

    /// The `w:body` element, or the root when there is none
    pub fn body(&self) -> &Element {
        self.root.find_child("w:body").unwrap_or(&self.root)
    }

    /// Numbering part, if present
    pub fn numbering(&self) -> Option<&Element> {
        self.numbering.as_ref()
    }

    /// Numbering part, created empty on first use
    pub fn numbering_mut(&mut self) -> &mut Element {
        self.numbering.get_or_insert_with(|| Element::new("w:numbering"))
    }

    /// Writable page width in twips
    ///
    /// Read from the body's last `w:sectPr`: page width minus left and
    /// right margins. Falls back to [`DEFAULT_PAGE_WIDTH`].
    pub fn page_width(&self) -> u32 {
        let Some(sect) = self
            .body()
            .children_elements()
            .filter(|e| e.tag == "w:sectPr")
            .last()
        else {
            return DEFAULT_PAGE_WIDTH;
        };
        let Some(width) = sect.find_child("w:pgSz").and_then(|s| s.attrs.get_attr_u32("w:w")) else {
            return DEFAULT_PAGE_WIDTH;
        };
        let margins = sect
            .find_child("w:pgMar")
            .map(|m| m.attrs.get_attr_u32("w:left").unwrap_or(0) + m.attrs.get_attr_u32("w:right").unwrap_or(0))
            .unwrap_or(0);
        match width.saturating_sub(margins) {
            0 => DEFAULT_PAGE_WIDTH,
            writable => writable,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Find first element matching predicate (depth-first search)
    pub fn find_element<F>(&self, predicate: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.iter_elements().find(|e| predicate(e))
    }

    /// Find all elements matching predicate
    pub fn find_all<F>(&self, predicate: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.iter_elements().filter(|e| predicate(e)).collect()
    }

    /// Check if any element matches predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Element) -> bool,
    {
        self.find_element(predicate).is_some()
    }

    /// Iterate over all elements of the main part (depth-first)
    pub fn iter_elements(&self) -> ElementIterator<'_> {
        ElementIterator::new(&self.root)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Path addressing
    // ─────────────────────────────────────────────────────────────────────────

    /// Path of the first element matching predicate, in depth-first order
    pub fn find_path<F>(&self, predicate: F) -> Option<NodePath>
    where
        F: Fn(&Element) -> bool,
    {
        let mut path = NodePath::new();
        Self::find_path_in(&self.root, &predicate, &mut path).then_some(path)
    }

    fn find_path_in<F>(elem: &Element, predicate: &F, path: &mut NodePath) -> bool
    where
        F: Fn(&Element) -> bool,
    {
        if predicate(elem) {
            return true;
        }
        for (idx, child) in elem.children.iter().enumerate() {
            if let Some(child_elem) = child.as_element() {
                path.push(idx);
                if Self::find_path_in(child_elem, predicate, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// Element at a path
    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(&self.root, |elem, &idx| elem.children.get(idx)?.as_element())
    }

    /// Element at a path (mutable)
    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut elem = &mut self.root;
        for &idx in path {
            elem = elem.children.get_mut(idx)?.as_element_mut()?;
        }
        Some(elem)
    }
}

// =============================================================================
// ElementIterator - depth-first element traversal
// =============================================================================

/// Depth-first iterator over elements
pub struct ElementIterator<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> ElementIterator<'a> {
    fn new(root: &'a Element) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for ElementIterator<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.stack.pop()?;
        // Push children in reverse order so they're visited left-to-right
        for child in elem.children.iter().rev() {
            if let Some(child_elem) = child.as_element() {
                self.stack.push(child_elem);
            }
        }
        Some(elem)
    }
}

// =============================================================================
// Relationships - hyperlink targets of the main part
// =============================================================================

/// External hyperlink relationships of the main part
///
/// Ids are `rId{n}`, allocated after `offset` so they do not clash with
/// relationships the document already declares. One id per distinct URI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    offset: u32,
    entries: Vec<(String, String)>,
    by_uri: FxHashMap<String, usize>,
}

impl Relationships {
    /// Empty table allocating from `rId1`
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table allocating after the `existing` relationships of the part
    pub fn with_offset(existing: u32) -> Self {
        Self {
            offset: existing,
            ..Self::default()
        }
    }

    /// Number of relationships added
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no relationships were added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Target URI of a relationship id
    pub fn target(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(rid, _)| rid == id)
            .map(|(_, uri)| uri.as_str())
    }

    /// Iterate `(id, uri)` pairs in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, uri)| (id.as_str(), uri.as_str()))
    }
}

impl HyperlinkAllocator for Relationships {
    fn add_relationship(&mut self, uri: &str) -> DocfillResult<String> {
        let uri = uri.trim();
        if !is_absolute_uri(uri) {
            return Err(DocfillError::InvalidUri(uri.to_string()));
        }
        if let Some(&idx) = self.by_uri.get(uri) {
            return Ok(self.entries[idx].0.clone());
        }
        let id = format!("rId{}", self.offset as usize + self.entries.len() + 1);
        self.by_uri.insert(uri.to_string(), self.entries.len());
        self.entries.push((id.clone(), uri.to_string()));
        Ok(id)
    }
}

/// `scheme ":" rest`, scheme per RFC 3986, rest non-empty and free of
/// whitespace and control characters.
fn is_absolute_uri(uri: &str) -> bool {
    let Some((scheme, rest)) = uri.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    let rest = rest.trim_start_matches('/');
    scheme_ok && !rest.is_empty() && !rest.chars().any(|c| c.is_whitespace() || c.is_control())
}
