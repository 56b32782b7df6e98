//! Run and paragraph composition.
//!
//! # Text run precedence
//!
//! Run properties are decided in a fixed order:
//!
//! 1. A hyperlink target forces the `Hyperlink` character style, the
//!    themed hyperlink colour and a single underline. The explicit font
//!    is not applied.
//! 2. Otherwise the font goes to all three font slots.
//! 3. Bold and italic add their complex-script twins.
//! 4. Plain underline is only added when there is no hyperlink.
//! 5. Size is written in half points.
//! 6. A named colour that cannot be resolved is logged and dropped.
//!
//! Properties are emitted in schema order regardless of that precedence.

use std::path::Path;

use log::warn;

use crate::collab::{HyperlinkAllocator, PictureComposer};
use crate::color;
use crate::error::DocfillResult;
use crate::model::{Attachment, Paragraph, Run, RunStyle, TextRun};
use crate::node::{Document, Element};
use crate::numbering::effective_level;
use crate::units::points_to_half_points;

const HYPERLINK_STYLE: &str = "Hyperlink";
/// Colour Word shows for the hyperlink theme colour in the default theme.
const HYPERLINK_RGB: &str = "0563C1";

// =============================================================================
// RunComposer
// =============================================================================

/// Composes runs and paragraphs, embedding pictures through a collaborator
pub struct RunComposer<'a> {
    pictures: &'a mut dyn PictureComposer,
    flatten_images: bool,
}

impl<'a> RunComposer<'a> {
    pub fn new(pictures: &'a mut dyn PictureComposer) -> Self {
        Self {
            pictures,
            flatten_images: false,
        }
    }

    /// Ask the picture composer for inline pictures without frames
    pub fn flatten_images(mut self, flatten: bool) -> Self {
        self.flatten_images = flatten;
        self
    }

    /// Compose a single run.
    pub fn compose_run(&mut self, doc: &mut Document, run: &Run) -> DocfillResult<Element> {
        match run {
            Run::Break => Ok(Element::new("w:r").child(Element::new("w:br"))),
            Run::Image(image) if image.source.trim().is_empty() => Ok(Element::new("w:r")),
            Run::Image(image) => {
                let drawing = self
                    .pictures
                    .create_drawing(doc, Path::new(image.source.trim()), self.flatten_images)?;
                Ok(Element::new("w:r").child(drawing))
            }
            Run::Text(text) => Ok(compose_text_run(text)),
        }
    }

    /// Compose a paragraph and its runs.
    ///
    /// Runs with a hyperlink target are wrapped in `w:hyperlink`. A target
    /// the relationship table rejects is logged and the run is appended
    /// unwrapped.
    pub fn compose_paragraph_with_runs(&mut self, doc: &mut Document, paragraph: &Paragraph) -> DocfillResult<Element> {
        let mut p = compose_paragraph(paragraph.heading_level);
        self.append_runs(doc, &mut p, &paragraph.runs)?;
        Ok(p)
    }

    /// Compose `runs` and append them to an existing paragraph.
    pub fn append_runs(&mut self, doc: &mut Document, p: &mut Element, runs: &[Run]) -> DocfillResult<()> {
        for run in runs {
            let node = self.compose_run(doc, run)?;
            match run.hyperlink_uri() {
                Some(uri) => match doc.relationships.add_relationship(uri) {
                    Ok(rel_id) => p.push_elem(wrap_as_hyperlink(&rel_id, node)),
                    Err(err) => {
                        warn!("not linking run: {err}");
                        p.push_elem(node);
                    }
                },
                None => p.push_elem(node),
            }
        }
        Ok(())
    }

    /// Compose an attachment block.
    ///
    /// Pictures become an image paragraph followed by a caption carrying
    /// the display name. Every other kind is embedded as an object.
    pub fn compose_attachment(&mut self, doc: &mut Document, attachment: &Attachment) -> DocfillResult<Vec<Element>> {
        if attachment.kind.is_picture() {
            let drawing = self
                .pictures
                .create_drawing(doc, &attachment.path, self.flatten_images)?;
            let image = Element::new("w:p").child(Element::new("w:r").child(drawing));
            Ok(vec![image, compose_caption(&attachment.name)])
        } else {
            let embedded = self.pictures.attach_file(doc, &attachment.path, &attachment.name)?;
            Ok(vec![embedded])
        }
    }
}

// =============================================================================
// Text runs
// =============================================================================

/// Compose a text run (see the module docs for property precedence).
pub fn compose_text_run(text: &TextRun) -> Element {
    let style = &text.style;
    let mut r = Element::new("w:r");

    let props = run_properties(style);
    if !props.is_empty() {
        r.push_elem(props);
    }
    if style.insert_line_break_before {
        r.push_elem(Element::new("w:br"));
    }
    if !text.value.is_empty() {
        let mut t = Element::new("w:t");
        if style.preserve_space {
            t.set_attr("xml:space", "preserve");
        }
        t.push_text(text.value.as_str());
        r.push_elem(t);
    }
    r
}

/// Build `w:rPr` for a style. May be empty.
pub fn run_properties(style: &RunStyle) -> Element {
    let linked = style.hyperlink().is_some();
    let mut props = Element::new("w:rPr");

    if linked {
        props.push_elem(Element::with_val("w:rStyle", HYPERLINK_STYLE));
    } else if let Some(font) = style.font.as_deref().filter(|f| !f.trim().is_empty()) {
        props.push_elem(
            Element::new("w:rFonts")
                .attr("w:ascii", font)
                .attr("w:hAnsi", font)
                .attr("w:cs", font),
        );
    }
    if style.bold {
        props.push_elem(Element::new("w:b"));
        props.push_elem(Element::new("w:bCs"));
    }
    if style.italic {
        props.push_elem(Element::new("w:i"));
        props.push_elem(Element::new("w:iCs"));
    }

    if linked {
        props.push_elem(Element::with_val("w:color", HYPERLINK_RGB).attr("w:themeColor", "hyperlink"));
    } else if let Some(name) = style.font_color.as_deref().filter(|c| !c.trim().is_empty()) {
        match color::resolve(name) {
            Ok(rgb) => props.push_elem(Element::with_val("w:color", rgb)),
            Err(err) => warn!("dropping font colour: {err}"),
        }
    }

    if style.size != 0.0 {
        let half_points = points_to_half_points(style.size).to_string();
        props.push_elem(Element::with_val("w:sz", half_points.as_str()));
        props.push_elem(Element::with_val("w:szCs", half_points));
    }
    if linked || style.underline {
        props.push_elem(Element::with_val("w:u", "single"));
    }
    props
}

/// Wrap a composed run in a hyperlink pointing at relationship `rel_id`.
pub fn wrap_as_hyperlink(rel_id: &str, run: Element) -> Element {
    Element::new("w:hyperlink")
        .attr("r:id", rel_id)
        .attr("w:history", "1")
        .child(run)
}

/// Run holding a hard page break.
pub fn page_break_run() -> Element {
    Element::new("w:r").child(Element::new("w:br").attr("w:type", "page"))
}

// =============================================================================
// Paragraphs
// =============================================================================

/// Empty paragraph; headings carry the `Heading{N}` style.
pub fn compose_paragraph(heading_level: u8) -> Element {
    let p = Element::new("w:p");
    if heading_level == 0 {
        return p;
    }
    p.child(Element::new("w:pPr").child(Element::with_val("w:pStyle", format!("Heading{heading_level}"))))
}

/// Paragraph that renders as an item of numbering instance `num_id`.
///
/// The level is clamped to the supported range and forced to 0 for
/// single-level lists.
pub fn compose_list_item_paragraph(level: u8, num_id: u32, multi_level: bool) -> Element {
    let level = effective_level(level, multi_level);
    Element::new("w:p").child(
        Element::new("w:pPr")
            .child(Element::with_val("w:pStyle", "ListParagraph"))
            .child(
                Element::new("w:numPr")
                    .child(Element::with_val("w:ilvl", level.to_string()))
                    .child(Element::with_val("w:numId", num_id.to_string())),
            ),
    )
}

/// Left-aligned `Caption` paragraph holding `text`.
pub fn compose_caption(text: &str) -> Element {
    Element::new("w:p")
        .child(
            Element::new("w:pPr")
                .child(Element::with_val("w:pStyle", "Caption"))
                .child(Element::with_val("w:jc", "left")),
        )
        .child(Element::new("w:proofErr").attr("w:type", "spellStart"))
        .child(Element::new("w:r").child(Element::new("w:t").text(text)))
        .child(Element::new("w:proofErr").attr("w:type", "spellEnd"))
}

/// Paragraph with one unstyled text run.
pub fn text_paragraph(text: &str) -> Element {
    Element::new("w:p").child(Element::new("w:r").child(Element::new("w:t").text(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttachmentKind;
    use crate::test_support::StubPictures;

    fn tags(elem: &Element) -> Vec<&str> {
        elem.children_elements().map(|e| e.tag.as_str()).collect()
    }

    fn doc() -> Document {
        Document::from_body(Element::new("w:body"))
    }

    #[test]
    fn test_break_run() {
        let mut pictures = StubPictures::default();
        let r = RunComposer::new(&mut pictures).compose_run(&mut doc(), &Run::Break).unwrap();
        assert_eq!(tags(&r), vec!["w:br"]);
    }

    #[test]
    fn test_image_runs() {
        let mut pictures = StubPictures::default();
        let mut doc = doc();
        let mut composer = RunComposer::new(&mut pictures);

        let r = composer.compose_run(&mut doc, &Run::image("chart.png")).unwrap();
        assert_eq!(tags(&r), vec!["w:drawing"]);

        let r = composer.compose_run(&mut doc, &Run::image("  ")).unwrap();
        assert!(r.is_empty());
        assert_eq!(pictures.drawings, vec!["chart.png".to_string()]);
    }

    #[test]
    fn test_hyperlink_wins_over_font_and_underline() {
        let style = RunStyle {
            font: Some("Arial".to_string()),
            bold: true,
            underline: true,
            hyperlink_uri: Some("https://x".to_string()),
            ..RunStyle::default()
        };
        let props = run_properties(&style);

        assert_eq!(tags(&props), vec!["w:rStyle", "w:b", "w:bCs", "w:color", "w:u"]);
        assert_eq!(props.children_elements().filter(|e| e.tag == "w:u").count(), 1);
        assert!(props.find_child("w:rFonts").is_none());
        assert_eq!(props.find_child("w:rStyle").and_then(Element::val), Some("Hyperlink"));
        assert_eq!(props.find_child("w:color").and_then(|c| c.get_attr("w:themeColor")), Some("hyperlink"));
    }

    #[test]
    fn test_font_applies_to_all_slots() {
        let style = RunStyle {
            font: Some("Calibri".to_string()),
            italic: true,
            underline: true,
            size: 11.0,
            font_color: Some("dark blue".to_string()),
            ..RunStyle::default()
        };
        let props = run_properties(&style);
        assert_eq!(
            tags(&props),
            vec!["w:rFonts", "w:i", "w:iCs", "w:color", "w:sz", "w:szCs", "w:u"]
        );
        let fonts = props.find_child("w:rFonts").unwrap();
        for slot in ["w:ascii", "w:hAnsi", "w:cs"] {
            assert_eq!(fonts.get_attr(slot), Some("Calibri"));
        }
        assert_eq!(props.find_child("w:sz").and_then(Element::val), Some("22"));
        assert_eq!(props.find_child("w:color").and_then(Element::val), Some("00008B"));
    }

    #[test]
    fn test_unknown_colour_is_dropped() {
        let style = RunStyle {
            font_color: Some("no such colour".to_string()),
            ..RunStyle::default()
        };
        let r = compose_text_run(&TextRun {
            value: "still here".to_string(),
            style,
        });
        assert!(r.find_child("w:rPr").is_none());
        assert_eq!(r.text_content(), "still here");
    }

    #[test]
    fn test_line_break_and_preserve_space() {
        let style = RunStyle {
            insert_line_break_before: true,
            preserve_space: true,
            ..RunStyle::default()
        };
        let r = compose_text_run(&TextRun {
            value: " padded ".to_string(),
            style,
        });
        assert_eq!(tags(&r), vec!["w:br", "w:t"]);
        assert_eq!(r.find_child("w:t").and_then(|t| t.get_attr("xml:space")), Some("preserve"));

        let empty = compose_text_run(&TextRun::default());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_paragraph_with_links() {
        let mut pictures = StubPictures::default();
        let mut doc = doc();
        let linked = RunStyle {
            hyperlink_uri: Some("https://example.com/a".to_string()),
            ..RunStyle::default()
        };
        let broken = RunStyle {
            hyperlink_uri: Some("not a uri".to_string()),
            ..RunStyle::default()
        };
        let paragraph = Paragraph::heading(
            2,
            vec![Run::styled("see", linked), Run::text(" and "), Run::styled("this", broken)],
        );

        let p = RunComposer::new(&mut pictures)
            .compose_paragraph_with_runs(&mut doc, &paragraph)
            .unwrap();

        assert_eq!(tags(&p), vec!["w:pPr", "w:hyperlink", "w:r", "w:r"]);
        let link = p.find_child("w:hyperlink").unwrap();
        assert_eq!(link.get_attr("r:id"), Some("rId1"));
        assert_eq!(doc.relationships.len(), 1);
        assert_eq!(doc.relationships.target("rId1"), Some("https://example.com/a"));
        let style = p.find_child("w:pPr").and_then(|pp| pp.find_child("w:pStyle")).and_then(Element::val);
        assert_eq!(style, Some("Heading2"));
    }

    #[test]
    fn test_attachments() {
        let mut pictures = StubPictures::default();
        let mut doc = doc();
        let mut composer = RunComposer::new(&mut pictures);

        let picture = Attachment {
            path: "plot.png".into(),
            kind: AttachmentKind::Picture,
            name: "Plot".to_string(),
        };
        let nodes = composer.compose_attachment(&mut doc, &picture).unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].find_child("w:r").is_some_and(|r| r.has_child("w:drawing")));
        assert_eq!(nodes[1].text_content(), "Plot");

        let sheet = Attachment {
            path: "data.xlsx".into(),
            kind: AttachmentKind::Spreadsheet,
            name: "Data".to_string(),
        };
        let nodes = composer.compose_attachment(&mut doc, &sheet).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(pictures.attached, vec!["data.xlsx".to_string()]);
    }

    #[test]
    fn test_plain_paragraph_has_no_properties() {
        assert!(compose_paragraph(0).is_empty());
    }

    #[test]
    fn test_list_item_paragraph() {
        let p = compose_list_item_paragraph(5, 7, false);
        let ppr = p.find_child("w:pPr").unwrap();
        assert_eq!(ppr.find_child("w:pStyle").and_then(Element::val), Some("ListParagraph"));
        let num_pr = ppr.find_child("w:numPr").unwrap();
        assert_eq!(num_pr.find_child("w:ilvl").and_then(Element::val), Some("0"));
        assert_eq!(num_pr.find_child("w:numId").and_then(Element::val), Some("7"));

        let p = compose_list_item_paragraph(11, 7, true);
        assert!(crate::render::render_element(&p).contains(r#"<w:ilvl w:val="8"/>"#));
    }

    #[test]
    fn test_caption() {
        let p = compose_caption("Figure 1");
        assert_eq!(tags(&p), vec!["w:pPr", "w:proofErr", "w:r", "w:proofErr"]);
        assert_eq!(p.text_content(), "Figure 1");
        assert_eq!(p.children_elements().nth(1).and_then(|e| e.get_attr("w:type")), Some("spellStart"));
        assert_eq!(p.children_elements().nth(3).and_then(|e| e.get_attr("w:type")), Some("spellEnd"));
    }
}
