//! XML rendering of document parts.
//!
//! Renders the main part, the numbering part and the hyperlink
//! relationships to XML strings, ready to be written into a package by
//! the caller.

use crate::attr::Attrs;
use crate::node::{Document, Element, Node, Relationships};

// =============================================================================
// RenderConfig
// =============================================================================

/// XML declaration written at the top of a part.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const HYPERLINK_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// Configuration for XML rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Indent nested elements. Elements holding text stay on one line.
    pub pretty: bool,
    /// Emit the XML declaration.
    pub declaration: bool,
}

impl RenderConfig {
    /// Part output: declaration, no indentation.
    pub const PART: Self = Self {
        pretty: false,
        declaration: true,
    };

    /// Fragment output for logs and tests.
    pub const FRAGMENT: Self = Self {
        pretty: false,
        declaration: false,
    };

    pub fn new(pretty: bool, declaration: bool) -> Self {
        Self { pretty, declaration }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::PART
    }
}

// =============================================================================
// Part rendering
// =============================================================================

/// Render the main part.
pub fn render_document(doc: &Document, config: &RenderConfig) -> String {
    render_part(&doc.root, config)
}

/// Render the numbering part, if the document has one.
pub fn render_numbering(doc: &Document, config: &RenderConfig) -> Option<String> {
    doc.numbering.as_ref().map(|numbering| render_part(numbering, config))
}

/// Render the hyperlink relationships as a relationships part.
pub fn render_relationships(rels: &Relationships, config: &RenderConfig) -> String {
    let mut root = Element::new("Relationships").attr("xmlns", RELATIONSHIPS_NS);
    for (id, target) in rels.iter() {
        root.push_elem(
            Element::new("Relationship")
                .attr("Id", id)
                .attr("Type", HYPERLINK_TYPE)
                .attr("Target", target)
                .attr("TargetMode", "External"),
        );
    }
    render_part(&root, config)
}

/// Render one element compactly, without declaration.
pub fn render_element(elem: &Element) -> String {
    let mut output = String::new();
    write_element(elem, &RenderConfig::FRAGMENT, 0, &mut output);
    output
}

fn render_part(root: &Element, config: &RenderConfig) -> String {
    let mut output = String::new();
    if config.declaration {
        output.push_str(XML_DECLARATION);
        if config.pretty {
            output.push('\n');
        }
    }
    write_element(root, config, 0, &mut output);
    output
}

fn write_element(elem: &Element, config: &RenderConfig, depth: usize, output: &mut String) {
    output.push('<');
    output.push_str(&elem.tag);
    write_attrs(&elem.attrs, output);

    if elem.children.is_empty() {
        output.push_str("/>");
        return;
    }
    output.push('>');

    // Whitespace inside text-bearing elements is significant.
    let indent = config.pretty && elem.children.iter().all(Node::is_element);
    for child in &elem.children {
        if indent {
            newline(depth + 1, output);
        }
        match child {
            Node::Element(e) => {
                let child_config = if indent { *config } else { config.with_pretty(false) };
                write_element(e, &child_config, depth + 1, output);
            }
            Node::Text(text) => escape_text(&text.content, output),
        }
    }
    if indent {
        newline(depth, output);
    }

    output.push_str("</");
    output.push_str(&elem.tag);
    output.push('>');
}

fn newline(depth: usize, output: &mut String) {
    output.push('\n');
    for _ in 0..depth {
        output.push_str("  ");
    }
}

fn write_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        escape_attr(value, output);
        output.push('"');
    }
}

fn escape_text(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

fn escape_attr(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\n' => output.push_str("&#10;"),
            '\t' => output.push_str("&#9;"),
            _ => output.push(c),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::HyperlinkAllocator;

    fn paragraph(text: &str) -> Element {
        Element::new("w:p").child(Element::new("w:r").child(Element::new("w:t").text(text)))
    }

    #[test]
    fn test_render_compact() {
        let p = paragraph("a < b & c").attr("w:rsidR", "00AB\"12");
        assert_eq!(
            render_element(&p),
            r#"<w:p w:rsidR="00AB&quot;12"><w:r><w:t>a &lt; b &amp; c</w:t></w:r></w:p>"#
        );
        assert_eq!(render_element(&Element::new("w:br")), "<w:br/>");
    }

    #[test]
    fn test_render_document_declaration() {
        let doc = Document::from_body(Element::new("w:body").child(paragraph("x")));
        let xml = render_document(&doc, &RenderConfig::default());
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.ends_with("</w:document>"));

        let bare = render_document(&doc, &RenderConfig::FRAGMENT);
        assert!(bare.starts_with("<w:document>"));
    }

    #[test]
    fn test_pretty_keeps_text_inline() {
        let t = Element::new("w:t").attr("xml:space", "preserve").text("  spaced  ");
        let p = Element::new("w:p").child(Element::new("w:r").child(t));
        let doc = Document::from_body(Element::new("w:body").child(p));

        let xml = render_document(&doc, &RenderConfig::new(true, false));
        assert!(xml.contains("\n        <w:t xml:space=\"preserve\">  spaced  </w:t>\n      </w:r>"));
        assert!(xml.starts_with("<w:document>\n  <w:body>"));
    }

    #[test]
    fn test_render_numbering_and_relationships() {
        let mut doc = Document::from_body(Element::new("w:body"));
        assert!(render_numbering(&doc, &RenderConfig::FRAGMENT).is_none());
        doc.numbering_mut();
        assert_eq!(
            render_numbering(&doc, &RenderConfig::FRAGMENT).as_deref(),
            Some("<w:numbering/>")
        );

        doc.relationships.add_relationship("https://example.com/?a=1&b=2").unwrap();
        let rels = render_relationships(&doc.relationships, &RenderConfig::FRAGMENT);
        assert!(rels.contains(r#"Id="rId1""#));
        assert!(rels.contains(r#"Target="https://example.com/?a=1&amp;b=2""#));
        assert!(rels.contains(r#"TargetMode="External""#));
    }
}
