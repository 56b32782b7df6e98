//! Stub collaborators shared by the unit tests.

use std::path::Path;

use crate::collab::{MarkupConverter, PictureComposer};
use crate::error::{DocfillError, DocfillResult};
use crate::node::{Document, Element, Node};
use crate::transform::OPAQUE_TAG;

/// Records what it was asked to embed. Paths equal to `fail_on` fail.
#[derive(Debug, Default)]
pub struct StubPictures {
    pub drawings: Vec<String>,
    /// `flattened` flag of every drawing request
    pub flattened: Vec<bool>,
    pub attached: Vec<String>,
    pub fail_on: Option<String>,
}

impl StubPictures {
    pub fn failing_on(path: &str) -> Self {
        Self {
            fail_on: Some(path.to_string()),
            ..Self::default()
        }
    }

    fn check(&self, path: &Path) -> DocfillResult<String> {
        let path = path.display().to_string();
        if self.fail_on.as_deref() == Some(path.as_str()) {
            return Err(DocfillError::collaborator(format!("cannot read {path}")));
        }
        Ok(path)
    }
}

impl PictureComposer for StubPictures {
    fn create_drawing(&mut self, _doc: &mut Document, path: &Path, flattened: bool) -> DocfillResult<Element> {
        let path = self.check(path)?;
        self.drawings.push(path);
        self.flattened.push(flattened);
        Ok(Element::new("w:drawing"))
    }

    fn attach_file(&mut self, _doc: &mut Document, path: &Path, display_name: &str) -> DocfillResult<Element> {
        let path = self.check(path)?;
        self.attached.push(path);
        Ok(Element::new("w:p").child(
            Element::new("w:r")
                .child(Element::new("w:object"))
                .child(Element::new("w:t").text(display_name)),
        ))
    }
}

/// What [`StubMarkup`] turns a fragment into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupMode {
    /// One paragraph holding the raw fragment text
    #[default]
    Paragraph,
    /// A bare `w:altChunk` surrounded by blank paragraphs
    Chunk,
    /// A bare `w:altChunk` and nothing else
    ChunkOnly,
    /// Conversion error
    Fail,
}

#[derive(Debug, Default)]
pub struct StubMarkup {
    pub mode: MarkupMode,
    pub calls: Vec<(String, String, u32)>,
}

impl StubMarkup {
    pub fn new(mode: MarkupMode) -> Self {
        Self {
            mode,
            calls: Vec::new(),
        }
    }
}

impl MarkupConverter for StubMarkup {
    fn convert(&mut self, _doc: &mut Document, fragment: &str, font: &str, font_size: u32) -> DocfillResult<Vec<Node>> {
        self.calls.push((fragment.to_string(), font.to_string(), font_size));
        let chunk = || Node::from(Element::new(OPAQUE_TAG).attr("r:id", "rIdChunk"));
        match self.mode {
            MarkupMode::Paragraph => Ok(vec![
                Element::new("w:p")
                    .child(Element::new("w:r").child(Element::new("w:t").text(fragment)))
                    .into(),
            ]),
            MarkupMode::Chunk => Ok(vec![Element::new("w:p").into(), chunk(), Element::new("w:p").into()]),
            MarkupMode::ChunkOnly => Ok(vec![chunk()]),
            MarkupMode::Fail => Err(DocfillError::collaborator("malformed markup")),
        }
    }
}
