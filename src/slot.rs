//! Named insertion points.
//!
//! A slot is a block-level content control (`w:sdt`) whose
//! `w:sdtPr/w:alias` carries the slot title. Its content lives in
//! `w:sdtContent`. Lookups scan the main part depth-first and the first
//! match wins.
//!
//! A [`Slot`] handle stores the index path of the control, so it is only
//! good until the next structural change of the tree. Every mutating
//! operation here re-locates the slot by title first.

use log::debug;

use crate::error::{DocfillError, DocfillResult};
use crate::node::{Document, Element, Node, NodePath};
use crate::transform::{ElementValidator, OPAQUE_TAG};

/// Text Word shows in an untouched plain-text content control.
pub const EMPTY_PLACEHOLDER: &str = "Click here to enter text.";

const SDT: &str = "w:sdt";
const SDT_PR: &str = "w:sdtPr";
const SDT_CONTENT: &str = "w:sdtContent";
const ALIAS: &str = "w:alias";
const SHOWING_PLACEHOLDER: &str = "w:showingPlcHdr";

/// A located slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub title: String,
    pub path: NodePath,
}

/// Alias of a content control, if `elem` is one
pub fn alias_of(elem: &Element) -> Option<&str> {
    if elem.tag != SDT {
        return None;
    }
    elem.find_child(SDT_PR)?.find_child(ALIAS)?.val()
}

/// Locate the slot titled `title`.
pub fn find(doc: &Document, title: &str) -> DocfillResult<Slot> {
    doc.find_path(|e| alias_of(e) == Some(title))
        .map(|path| Slot {
            title: title.to_string(),
            path,
        })
        .ok_or_else(|| DocfillError::slot_not_found(title))
}

fn slot_element<'a>(doc: &'a Document, slot: &Slot) -> DocfillResult<&'a Element> {
    doc.element_at(&slot.path)
        .filter(|e| alias_of(e) == Some(slot.title.as_str()))
        .ok_or_else(|| DocfillError::slot_not_found(&slot.title))
}

fn slot_element_mut<'a>(doc: &'a mut Document, slot: &Slot) -> DocfillResult<&'a mut Element> {
    doc.element_at_mut(&slot.path)
        .filter(|e| alias_of(e) == Some(slot.title.as_str()))
        .ok_or_else(|| DocfillError::slot_not_found(&slot.title))
}

/// Flattened text of the slot's content
pub fn content_text(doc: &Document, slot: &Slot) -> DocfillResult<String> {
    let elem = slot_element(doc, slot)?;
    Ok(elem
        .children_elements()
        .filter(|e| e.tag == SDT_CONTENT)
        .map(Element::text_content)
        .collect())
}

/// Empty the slot if it still shows [`EMPTY_PLACEHOLDER`], or always when
/// `force` is set. Returns whether anything was cleared.
pub fn clear(doc: &mut Document, title: &str, force: bool) -> DocfillResult<bool> {
    clear_matching(doc, title, force, EMPTY_PLACEHOLDER)
}

/// Like [`clear`] with a custom placeholder sentinel.
///
/// Clearing also drops `w:showingPlcHdr`, otherwise Word keeps treating
/// whatever is appended next as placeholder text.
pub fn clear_matching(doc: &mut Document, title: &str, force: bool, placeholder: &str) -> DocfillResult<bool> {
    let slot = find(doc, title)?;
    if !force && content_text(doc, &slot)?.trim() != placeholder.trim() {
        return Ok(false);
    }
    let elem = slot_element_mut(doc, &slot)?;
    for content in elem.children_elements_mut().filter(|e| e.tag == SDT_CONTENT) {
        content.children.clear();
    }
    if let Some(props) = elem.find_child_mut(SDT_PR) {
        props.children.retain(|n| !n.is_tag(SHOWING_PLACEHOLDER));
    }
    debug!("cleared slot {title:?}");
    Ok(true)
}

/// Unwrap the slot: its content takes the place of the content control.
///
/// Every top-level inner element is validated first (opaque chunks are
/// skipped). If any check fails nothing is changed and
/// `InvalidInnerContent` lists every problem found.
pub fn remove(doc: &mut Document, title: &str, validator: &dyn ElementValidator) -> DocfillResult<()> {
    let slot = find(doc, title)?;
    let elem = slot_element(doc, &slot)?;

    let inner: Vec<&Node> = elem
        .children_elements()
        .filter(|e| e.tag == SDT_CONTENT)
        .flat_map(|content| content.children.iter())
        .collect();

    let errors: Vec<String> = inner
        .iter()
        .filter_map(|node| node.as_element())
        .filter(|e| e.tag != OPAQUE_TAG)
        .flat_map(|e| validator.validate_element(e))
        .collect();
    if !errors.is_empty() {
        return Err(DocfillError::InvalidInnerContent {
            title: title.to_string(),
            errors,
        });
    }

    let promoted: Vec<Node> = inner.into_iter().cloned().collect();
    let (&index, parent_path) = slot
        .path
        .split_last()
        .ok_or_else(|| DocfillError::slot_not_found(title))?;
    let parent = doc
        .element_at_mut(parent_path)
        .ok_or_else(|| DocfillError::slot_not_found(title))?;

    debug!("unwrapping slot {title:?} into {} node(s)", promoted.len());
    parent.children.remove(index);
    parent.children.insert_many(index, promoted);
    Ok(())
}

/// Append nodes to the slot's content, creating `w:sdtContent` if absent.
pub fn append(doc: &mut Document, slot: &Slot, nodes: impl IntoIterator<Item = Node>) -> DocfillResult<()> {
    let elem = slot_element_mut(doc, slot)?;
    if !elem.has_child(SDT_CONTENT) {
        elem.push_elem(Element::new(SDT_CONTENT));
    }
    let content = elem
        .find_child_mut(SDT_CONTENT)
        .ok_or_else(|| DocfillError::slot_not_found(&slot.title))?;
    content.children.extend(nodes);
    Ok(())
}

/// Locate the slot by title and append nodes to it.
pub fn append_to(doc: &mut Document, title: &str, nodes: impl IntoIterator<Item = Node>) -> DocfillResult<()> {
    let slot = find(doc, title)?;
    append(doc, &slot, nodes)
}

/// Build an empty slot element, as a template author would leave it.
pub fn placeholder_slot(title: &str) -> Element {
    Element::new(SDT)
        .child(
            Element::new(SDT_PR)
                .child(Element::with_val(ALIAS, title))
                .child(Element::with_val("w:tag", title))
                .child(Element::new(SHOWING_PLACEHOLDER)),
        )
        .child(
            Element::new(SDT_CONTENT).child(
                Element::new("w:p").child(Element::new("w:r").child(Element::new("w:t").text(EMPTY_PLACEHOLDER))),
            ),
        )
}
