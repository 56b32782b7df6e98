//! Block placement into slots.
//!
//! [`Composer::render`] composes each block, re-locates the slot by title
//! and appends the result. Slot handles are never kept across appends.

use log::debug;

use crate::collab::Collaborators;
use crate::config::ComposeConfig;
use crate::error::DocfillResult;
use crate::model::{Block, List};
use crate::node::{Document, Element, Node};
use crate::numbering;
use crate::run::{compose_list_item_paragraph, RunComposer};
use crate::slot;
use crate::table::TableLayoutEngine;
use crate::transform::{CollapseChunkSpacing, ElementValidator, IdentityTransform, Transform};

/// What a [`Composer::render`] call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Top-level nodes appended to the slot
    pub nodes_appended: usize,
    /// Blank paragraphs removed next to imported chunks
    pub blank_paragraphs_removed: usize,
    /// Whether the slot wrapper was removed
    pub unwrapped: bool,
}

/// Places blocks into named slots of a document
pub struct Composer<'a> {
    config: ComposeConfig,
    validator: &'a dyn ElementValidator,
    collab: Collaborators<'a>,
}

impl<'a> Composer<'a> {
    pub fn new(config: ComposeConfig, validator: &'a dyn ElementValidator, collab: Collaborators<'a>) -> Self {
        Self {
            config,
            validator,
            collab,
        }
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// Compose `blocks` into the slot titled `title`.
    ///
    /// A missing slot fails before anything is changed. Later errors
    /// leave the blocks appended so far in place.
    pub fn render(&mut self, doc: &mut Document, title: &str, blocks: &[Block]) -> DocfillResult<RenderReport> {
        slot::find(doc, title)?;
        if self.config.clear_placeholder {
            slot::clear_matching(doc, title, false, &self.config.placeholder_text)?;
        }

        let page_width = self.config.page_width_for(doc);
        let mut report = RenderReport::default();
        let mut imported = false;

        for block in blocks {
            let nodes = self.compose_block(doc, block, page_width)?;
            imported |= block.is_table() || block.is_markup_fragment();
            debug!("appending {} node(s) for {} block to slot {title:?}", nodes.len(), block.kind());
            report.nodes_appended += nodes.len();

            let slot = slot::find(doc, title)?;
            slot::append(doc, &slot, nodes)?;
        }

        let cleanup: &dyn Transform = if imported { &CollapseChunkSpacing } else { &IdentityTransform };
        report.blank_paragraphs_removed = cleanup.apply(doc);

        if self.config.unwrap_slot {
            slot::remove(doc, title, self.validator)?;
            report.unwrapped = true;
        }
        Ok(report)
    }

    fn runs(&mut self) -> RunComposer<'_> {
        RunComposer::new(&mut *self.collab.pictures).flatten_images(self.config.flatten_images)
    }

    fn compose_block(&mut self, doc: &mut Document, block: &Block, page_width: u32) -> DocfillResult<Vec<Node>> {
        match block {
            Block::Paragraph(paragraph) => {
                let p = self.runs().compose_paragraph_with_runs(doc, paragraph)?;
                Ok(vec![p.into()])
            }
            Block::List(list) => self.compose_list(doc, list),
            Block::Table(table) => {
                let built = TableLayoutEngine::new(&mut self.collab, page_width)
                    .flatten_images(self.config.flatten_images)
                    .build(doc, table);
                Ok(built.into_nodes().into())
            }
            Block::Attachment(attachment) => {
                let elems = self.runs().compose_attachment(doc, attachment)?;
                Ok(elems.into_iter().map(Node::from).collect())
            }
            Block::MarkupFragment(fragment) => {
                self.collab
                    .markup
                    .convert(doc, &fragment.raw, &fragment.font, fragment.font_size)
            }
        }
    }

    /// One numbering instance per list; an empty list allocates nothing.
    ///
    /// Item runs are composed before the numbering part is touched, so a
    /// failing item leaves no orphan definition behind.
    fn compose_list(&mut self, doc: &mut Document, list: &List) -> DocfillResult<Vec<Node>> {
        if list.items.is_empty() {
            return Ok(Vec::new());
        }
        let mut bodies = Vec::with_capacity(list.items.len());
        let mut runs = self.runs();
        for item in &list.items {
            let mut body = Element::new("w:p");
            runs.append_runs(doc, &mut body, &item.runs)?;
            bodies.push(body);
        }

        let instance = numbering::allocate(doc, list.ordered, list.items.len());
        Ok(list
            .items
            .iter()
            .zip(bodies)
            .map(|(item, body)| {
                let mut p = compose_list_item_paragraph(item.level, instance.num_id, instance.multi_level);
                p.children.extend(body.children);
                p.into()
            })
            .collect())
    }
}
