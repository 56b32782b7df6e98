//! Collaborator interfaces.
//!
//! Embedding pictures and files, converting markup fragments and
//! allocating hyperlink relationships all touch document-level resource
//! tables, so the composers receive them as explicit trait objects that
//! take the document handle instead of reaching for shared state.

use std::path::Path;

use crate::error::DocfillResult;
use crate::node::{Document, Element, Node};

/// Builds drawings and embedded-object paragraphs.
pub trait PictureComposer {
    /// Embed the image at `path` and return its `w:drawing` element.
    ///
    /// `flattened` asks for an inline picture without a frame.
    fn create_drawing(&mut self, doc: &mut Document, path: &Path, flattened: bool) -> DocfillResult<Element>;

    /// Embed the file at `path` as an object and return a paragraph
    /// showing it under `display_name`.
    fn attach_file(&mut self, doc: &mut Document, path: &Path, display_name: &str) -> DocfillResult<Element>;
}

/// Turns raw markup fragments into composable block nodes.
pub trait MarkupConverter {
    /// Convert `fragment`, styling its text with `font` at `font_size`
    /// points. May return opaque `w:altChunk` nodes.
    fn convert(&mut self, doc: &mut Document, fragment: &str, font: &str, font_size: u32) -> DocfillResult<Vec<Node>>;
}

/// Allocates hyperlink relationships on the main part.
pub trait HyperlinkAllocator {
    /// Register `uri` as an external hyperlink target and return its
    /// relationship id. Fails with `InvalidUri` for malformed targets.
    fn add_relationship(&mut self, uri: &str) -> DocfillResult<String>;
}

/// External composers used while building blocks.
pub struct Collaborators<'a> {
    pub pictures: &'a mut dyn PictureComposer,
    pub markup: &'a mut dyn MarkupConverter,
}

impl<'a> Collaborators<'a> {
    pub fn new(pictures: &'a mut dyn PictureComposer, markup: &'a mut dyn MarkupConverter) -> Self {
        Self { pictures, markup }
    }
}
