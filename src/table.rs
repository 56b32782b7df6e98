//! Table layout.
//!
//! Tables always span the full writable width. Cell widths are resolved
//! to proportional units against the page width, so a table keeps its
//! proportions when the page size changes.
//!
//! # Failure containment
//!
//! A cell that cannot be composed does not abort the table. The error is
//! logged with the cell's row and column and the cell content is replaced
//! by a single diagnostic paragraph. Row and column numbers are 0-based
//! and count declared cells.
//!
//! # Merged rows
//!
//! A merged row renders its first declared cell spanning `merge_span`
//! grid columns (the whole grid when the span is 0). Declared cells the
//! span covers are dropped; cells past the span are kept as normal cells.

use log::{debug, warn};

use crate::collab::{Collaborators, MarkupConverter, PictureComposer};
use crate::error::{DocfillError, DocfillResult};
use crate::model::{Cell, Row, Shading, Table};
use crate::node::{Document, Element, Node};
use crate::run::{page_break_run, text_paragraph, RunComposer};
use crate::units::{cm_to_twips, percent_to_pct, split_number, twips_to_pct, PCT_FULL};

const BORDER_SIDES: [&str; 4] = ["w:top", "w:left", "w:bottom", "w:right"];

/// Cell width in the host format's terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedWidth {
    Auto,
    /// Fiftieths of a percent of the table width
    Pct(u32),
}

/// Resolve a width literal: blank, `"<n>%"` or `"<n>cm"`.
///
/// Percentages must lie in `0..=100` and centimetres must be positive,
/// otherwise `Range`. Unknown units and unparsable numbers are `Format`.
pub fn resolve_cell_width(literal: &str, page_width: u32) -> DocfillResult<ResolvedWidth> {
    let literal = literal.trim();
    if literal.is_empty() {
        return Ok(ResolvedWidth::Auto);
    }
    let (value, unit) = split_number(literal)?;
    match unit.to_ascii_lowercase().as_str() {
        "%" => {
            if !(0.0..=100.0).contains(&value) {
                return Err(DocfillError::range(format!("cell width {literal:?} is outside 0-100%")));
            }
            Ok(ResolvedWidth::Pct(percent_to_pct(value)))
        }
        "cm" => {
            if value <= 0.0 {
                return Err(DocfillError::range(format!("cell width {literal:?} must be positive")));
            }
            Ok(ResolvedWidth::Pct(twips_to_pct(cm_to_twips(value), page_width)))
        }
        other => Err(DocfillError::format(format!("unsupported width unit {other:?} in {literal:?}"))),
    }
}

/// A composed table and the paragraph that must follow it
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTable {
    pub table: Element,
    /// Empty paragraph, or one holding a page break
    pub separator: Element,
}

impl BuiltTable {
    pub fn into_nodes(self) -> [Node; 2] {
        [self.table.into(), self.separator.into()]
    }
}

// =============================================================================
// TableLayoutEngine
// =============================================================================

/// Builds `w:tbl` elements from table blocks
pub struct TableLayoutEngine<'a> {
    pictures: &'a mut dyn PictureComposer,
    markup: &'a mut dyn MarkupConverter,
    page_width: u32,
    flatten_images: bool,
}

impl<'a> TableLayoutEngine<'a> {
    /// Engine resolving absolute widths against `page_width` twips.
    pub fn new(collab: &'a mut Collaborators<'_>, page_width: u32) -> Self {
        Self {
            pictures: &mut *collab.pictures,
            markup: &mut *collab.markup,
            page_width,
            flatten_images: false,
        }
    }

    pub fn flatten_images(mut self, flatten: bool) -> Self {
        self.flatten_images = flatten;
        self
    }

    /// Build a table. Never fails; see the module docs.
    pub fn build(&mut self, doc: &mut Document, table: &Table) -> BuiltTable {
        let columns = table.rows.iter().map(Row::logical_width).max().unwrap_or(0).max(1);

        let mut tbl = Element::new("w:tbl").child(
            Element::new("w:tblPr").child(
                Element::new("w:tblW")
                    .attr("w:w", PCT_FULL.to_string())
                    .attr("w:type", "pct"),
            ),
        );
        let hint = (PCT_FULL / columns as u32).to_string();
        let mut grid = Element::new("w:tblGrid");
        for _ in 0..columns {
            grid.push_elem(Element::new("w:gridCol").attr("w:w", hint.as_str()));
        }
        tbl.push_elem(grid);

        for (index, row) in table.rows.iter().enumerate() {
            let header = index == 0 && table.repeat_header_row;
            let tr = self.build_row(doc, index, row, columns, header);
            tbl.push_elem(tr);
        }
        debug!("built table: {} row(s), {columns} grid column(s)", table.rows.len());

        let separator = if table.insert_page_break_after {
            Element::new("w:p").child(page_break_run())
        } else {
            Element::new("w:p")
        };
        BuiltTable { table: tbl, separator }
    }

    fn build_row(&mut self, doc: &mut Document, index: usize, row: &Row, columns: usize, header: bool) -> Element {
        let mut tr = Element::new("w:tr");
        if header {
            tr.push_elem(Element::new("w:trPr").child(Element::new("w:tblHeader")));
        }

        if row.cells.is_empty() {
            warn!("table row {index} has no cells, filling it with an empty cell");
            let tc = self.build_cell(doc, index, 0, &Cell::default(), Some(columns as u32));
            tr.push_elem(tc);
            return tr;
        }

        for (col, span) in row_layout(index, row, columns) {
            let tc = self.build_cell(doc, index, col, &row.cells[col], span);
            tr.push_elem(tc);
        }
        tr
    }

    fn build_cell(&mut self, doc: &mut Document, row: usize, col: usize, cell: &Cell, span: Option<u32>) -> Element {
        let composed = match resolve_cell_width(&cell.width, self.page_width) {
            Ok(width) => self.cell_content(doc, cell).map(|content| (width, content)),
            Err(err) => Err(err),
        };
        let (width, content) = composed.unwrap_or_else(|err| {
            warn!("table cell at row {row}, column {col} failed: {err}");
            (ResolvedWidth::Auto, vec![diagnostic_paragraph(row, col, &err).into()])
        });

        let mut tc = Element::new("w:tc").child(cell_properties(width, cell.shading.as_ref(), span));
        tc.children.extend(content);
        tc
    }

    fn cell_content(&mut self, doc: &mut Document, cell: &Cell) -> DocfillResult<Vec<Node>> {
        let mut nodes: Vec<Node> = Vec::new();

        let mut runs = RunComposer::new(&mut *self.pictures).flatten_images(self.flatten_images);
        for paragraph in &cell.paragraphs {
            nodes.push(runs.compose_paragraph_with_runs(doc, paragraph)?.into());
        }
        if cell.paragraphs.is_empty() && !cell.has_extra_content() {
            nodes.push(Element::new("w:p").into());
        }
        for attachment in &cell.attachments {
            let composed = runs.compose_attachment(doc, attachment)?;
            nodes.extend(composed.into_iter().map(Node::from));
        }

        if let Some(fragment) = &cell.markup {
            let converted = self
                .markup
                .convert(doc, &fragment.raw, &fragment.font, fragment.font_size)?;
            let has_paragraph = converted.iter().any(|n| n.is_tag("w:p"));
            nodes.extend(converted);
            if !has_paragraph {
                nodes.push(Element::new("w:p").into());
            }
        }

        if !nodes.iter().any(|n| n.is_tag("w:p")) {
            return Err(DocfillError::EmptyCell);
        }
        Ok(nodes)
    }
}

/// `(declared cell index, grid span)` of every cell a row renders.
fn row_layout(index: usize, row: &Row, columns: usize) -> Vec<(usize, Option<u32>)> {
    if !row.merge_to_one_cell {
        return (0..row.cells.len()).map(|col| (col, None)).collect();
    }

    let span = match row.merge_span {
        0 => columns,
        n => n as usize,
    };
    let covered = row.cells.len().min(span);
    if covered > 1 {
        warn!(
            "table row {index}: dropping {} cell(s) covered by a merge over {span} column(s)",
            covered - 1
        );
    }
    std::iter::once((0, Some(span as u32)))
        .chain((span.max(1)..row.cells.len()).map(|col| (col, None)))
        .collect()
}

fn cell_properties(width: ResolvedWidth, shading: Option<&Shading>, span: Option<u32>) -> Element {
    let (w, kind) = match width {
        ResolvedWidth::Auto => (0, "auto"),
        ResolvedWidth::Pct(pct) => (pct, "pct"),
    };
    let mut props = Element::new("w:tcPr").child(
        Element::new("w:tcW")
            .attr("w:w", w.to_string())
            .attr("w:type", kind),
    );
    if let Some(span) = span.filter(|&s| s > 1) {
        props.push_elem(Element::with_val("w:gridSpan", span.to_string()));
    }

    let mut borders = Element::new("w:tcBorders");
    for side in BORDER_SIDES {
        borders.push_elem(
            Element::with_val(side, "single")
                .attr("w:sz", "4")
                .attr("w:space", "0")
                .attr("w:color", "auto"),
        );
    }
    props.push_elem(borders);

    if let Some(shading) = shading {
        props.push_elem(
            Element::with_val("w:shd", shading.pattern.as_str())
                .attr("w:color", shading.color.as_str())
                .attr("w:fill", shading.fill.as_str()),
        );
    }
    props
}

fn diagnostic_paragraph(row: usize, col: usize, err: &DocfillError) -> Element {
    text_paragraph(&format!("Error in table cell (row {row}, column {col}): {err}"))
}
