//! Abstract document model.
//!
//! Callers parse their own input into these types; the composers turn them
//! into host-format elements. Blocks and runs are sum types so every
//! consumer dispatches on the variant explicitly.

use std::path::PathBuf;

// =============================================================================
// Blocks
// =============================================================================

/// A top-level unit of content placed into a slot
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    List(List),
    Table(Table),
    Attachment(Attachment),
    MarkupFragment(MarkupFragment),
}

impl Block {
    crate::impl_enum_accessors!(paragraph, list, table, attachment, markup_fragment);

    crate::impl_variant_names!(
        Paragraph => "paragraph",
        List => "list",
        Table => "table",
        Attachment => "attachment",
        MarkupFragment => "markup",
    );
}

/// Paragraph with optional heading level (0 = body text)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub heading_level: u8,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Body paragraph with the given runs
    pub fn new(runs: Vec<Run>) -> Self {
        Self { heading_level: 0, runs }
    }

    /// Heading paragraph with the given runs
    pub fn heading(level: u8, runs: Vec<Run>) -> Self {
        Self { heading_level: level, runs }
    }
}

/// Ordered or bulleted list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    pub items: Vec<ListItem>,
    pub ordered: bool,
}

/// One list entry at a nesting level (0 = outermost)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItem {
    pub level: u8,
    pub runs: Vec<Run>,
}

impl ListItem {
    pub fn new(level: u8, runs: Vec<Run>) -> Self {
        Self { level, runs }
    }
}

/// Grid table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
    /// Repeat the first row at the top of every page
    pub repeat_header_row: bool,
    /// End the table with a page break instead of an empty paragraph
    pub insert_page_break_after: bool,
}

/// Table row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Render the row as a single cell spanning `merge_span` grid columns
    pub merge_to_one_cell: bool,
    pub merge_span: u32,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            merge_to_one_cell: false,
            merge_span: 0,
        }
    }

    /// Row merged into one cell spanning `span` columns
    pub fn merged(cells: Vec<Cell>, span: u32) -> Self {
        Self {
            cells,
            merge_to_one_cell: true,
            merge_span: span,
        }
    }

    /// Number of grid columns this row occupies
    pub fn logical_width(&self) -> usize {
        if self.merge_to_one_cell {
            self.cells.len().max(self.merge_span as usize)
        } else {
            self.cells.len()
        }
    }
}

/// Table cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// Width literal: `""`, `"25%"` or `"3.5cm"`
    pub width: String,
    pub shading: Option<Shading>,
    pub paragraphs: Vec<Paragraph>,
    pub attachments: Vec<Attachment>,
    pub markup: Option<MarkupFragment>,
}

impl Cell {
    /// Cell holding one body paragraph
    pub fn with_paragraph(width: impl Into<String>, runs: Vec<Run>) -> Self {
        Self {
            width: width.into(),
            paragraphs: vec![Paragraph::new(runs)],
            ..Self::default()
        }
    }

    /// Whether the cell carries content other than paragraphs
    pub fn has_extra_content(&self) -> bool {
        !self.attachments.is_empty() || self.markup.is_some()
    }
}

/// Cell shading, passed through to the host format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shading {
    /// Pattern, e.g. `clear`
    pub pattern: String,
    pub color: String,
    pub fill: String,
}

impl Shading {
    /// Solid fill
    pub fn solid(fill: impl Into<String>) -> Self {
        Self {
            pattern: "clear".to_string(),
            color: "auto".to_string(),
            fill: fill.into(),
        }
    }
}

/// File placed into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: PathBuf,
    pub kind: AttachmentKind,
    /// Display name, also used as picture caption
    pub name: String,
}

/// What an attachment renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Picture,
    Document,
    Spreadsheet,
    Presentation,
    Other,
}

impl AttachmentKind {
    /// Pictures render inline with a caption; everything else is embedded
    pub fn is_picture(self) -> bool {
        self == Self::Picture
    }
}

/// Raw markup handed to the external converter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupFragment {
    pub raw: String,
    pub font: String,
    /// Point size
    pub font_size: u32,
}

// =============================================================================
// Runs
// =============================================================================

/// Inline content of a paragraph
#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text(TextRun),
    Break,
    Image(ImageRun),
}

impl Run {
    /// Unstyled text run
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(TextRun {
            value: value.into(),
            style: RunStyle::default(),
        })
    }

    /// Styled text run
    pub fn styled(value: impl Into<String>, style: RunStyle) -> Self {
        Self::Text(TextRun {
            value: value.into(),
            style,
        })
    }

    /// Image run for the picture at `source`
    pub fn image(source: impl Into<String>) -> Self {
        Self::Image(ImageRun { source: source.into() })
    }

    /// Hyperlink target, if this is a text run carrying one
    pub fn hyperlink_uri(&self) -> Option<&str> {
        match self {
            Self::Text(run) => run.style.hyperlink(),
            _ => None,
        }
    }
}

/// Text with styling
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    pub value: String,
    pub style: RunStyle,
}

/// Picture reference; an empty source renders an empty run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRun {
    pub source: String,
}

/// Character formatting of a text run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStyle {
    pub font: Option<String>,
    /// Point size, 0 leaves the size unset
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_color: Option<String>,
    pub hyperlink_uri: Option<String>,
    pub insert_line_break_before: bool,
    pub preserve_space: bool,
}

impl RunStyle {
    /// Non-blank hyperlink target
    pub fn hyperlink(&self) -> Option<&str> {
        self.hyperlink_uri.as_deref().filter(|uri| !uri.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_accessors() {
        let mut block = Block::List(List {
            items: vec![ListItem::new(0, vec![Run::text("a")])],
            ordered: true,
        });
        assert!(block.is_list());
        assert!(!block.is_table());
        assert_eq!(block.kind(), "list");
        assert_eq!(block.as_list().map(|l| l.items.len()), Some(1));

        block.as_list_mut().unwrap().ordered = false;
        assert_eq!(block.as_list().map(|l| l.ordered), Some(false));
        assert!(block.as_markup_fragment().is_none());
    }

    #[test]
    fn test_row_logical_width() {
        assert_eq!(Row::new(vec![Cell::default(); 3]).logical_width(), 3);
        assert_eq!(Row::merged(vec![Cell::default()], 4).logical_width(), 4);
        assert_eq!(Row::merged(vec![Cell::default(); 3], 2).logical_width(), 3);
    }

    #[test]
    fn test_blank_hyperlink_ignored() {
        let style = RunStyle {
            hyperlink_uri: Some("  ".to_string()),
            ..RunStyle::default()
        };
        assert_eq!(Run::styled("x", style).hyperlink_uri(), None);
        assert_eq!(Run::Break.hyperlink_uri(), None);
    }
}
