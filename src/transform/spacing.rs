//! Blank-line cleanup around imported chunks.
//!
//! Markup imports arrive as `w:altChunk` elements, and each import leaves
//! an empty paragraph on either side that renders as a stray blank line.

use log::debug;

use crate::node::{Document, Element, Node};

use super::{Transform, OPAQUE_TAG};

/// Removes the blank paragraphs directly next to every `w:altChunk`.
///
/// Runs over the whole main part. A run of several adjacent blank
/// paragraphs is removed as a whole so a second pass finds nothing left
/// to do. The last paragraph of a table cell is always kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseChunkSpacing;

impl Transform for CollapseChunkSpacing {
    fn apply(&self, doc: &mut Document) -> usize {
        let removed = collapse_in(&mut doc.root);
        if removed > 0 {
            debug!("removed {removed} blank paragraph(s) next to imported chunks");
        }
        removed
    }
}

/// A `w:p` with nothing visible: only properties and empty runs.
///
/// A paragraph whose properties carry a `w:sectPr` ends a section and is
/// never blank.
pub fn is_blank_paragraph(elem: &Element) -> bool {
    elem.tag == "w:p"
        && elem.children.iter().all(|child| match child {
            Node::Element(e) if e.tag == "w:pPr" => !e.has_child("w:sectPr"),
            Node::Element(e) if e.tag == "w:r" => e.children.iter().all(|n| n.is_tag("w:rPr")),
            _ => false,
        })
}

fn is_blank_node(node: &Node) -> bool {
    node.as_element().is_some_and(is_blank_paragraph)
}

fn collapse_in(elem: &mut Element) -> usize {
    let mut removed = 0;
    for child in elem.children_elements_mut() {
        removed += collapse_in(child);
    }

    let len = elem.children.len();
    let mut doomed = vec![false; len];
    for pos in (0..len).filter(|&i| elem.children[i].is_tag(OPAQUE_TAG)) {
        for i in (0..pos).rev() {
            if !is_blank_node(&elem.children[i]) {
                break;
            }
            doomed[i] = true;
        }
        for i in pos + 1..len {
            if !is_blank_node(&elem.children[i]) {
                break;
            }
            doomed[i] = true;
        }
    }

    if elem.tag == "w:tc" {
        let survivors = (0..len).filter(|&i| !doomed[i] && elem.children[i].is_tag("w:p")).count();
        if survivors == 0
            && let Some(last) = (0..len).rev().find(|&i| doomed[i])
        {
            doomed[last] = false;
        }
    }

    let count = doomed.iter().filter(|&&d| d).count();
    if count > 0 {
        let mut idx = 0;
        elem.children.retain(|_| {
            let keep = !doomed[idx];
            idx += 1;
            keep
        });
    }
    removed + count
}
