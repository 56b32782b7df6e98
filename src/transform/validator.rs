//! Structural validation of inner slot content.
//!
//! Validation only covers the content model of the elements the composers
//! emit. Elements outside that subset are walked but not judged, and
//! opaque foreign content (`w:altChunk`) is never inspected.

use crate::node::{Element, Node};

/// Tag of opaque foreign content (imported sub-documents).
pub const OPAQUE_TAG: &str = "w:altChunk";

/// Checks an element subtree and reports one message per problem.
///
/// Implementations must return no errors for [`OPAQUE_TAG`] elements
/// without looking inside them.
pub trait ElementValidator {
    fn validate_element(&self, element: &Element) -> Vec<String>;
}

// =============================================================================
// BasicValidator
// =============================================================================

/// Content-model validator for paragraphs, runs, hyperlinks and tables
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicValidator;

const PARAGRAPH_CHILDREN: &[&str] = &[
    "w:pPr", "w:r", "w:hyperlink", "w:proofErr", "w:bookmarkStart", "w:bookmarkEnd",
    "w:commentRangeStart", "w:commentRangeEnd", "w:ins", "w:del", "w:fldSimple", "w:sdt",
    "w:smartTag", "w:permStart", "w:permEnd", "w:moveFrom", "w:moveTo", "m:oMath", "m:oMathPara",
];

const RUN_CHILDREN: &[&str] = &[
    "w:rPr", "w:t", "w:br", "w:tab", "w:cr", "w:drawing", "w:object", "w:pict", "w:sym",
    "w:fldChar", "w:instrText", "w:delText", "w:noBreakHyphen", "w:softHyphen", "w:ptab",
    "w:lastRenderedPageBreak", "w:footnoteReference", "w:endnoteReference",
    "w:commentReference", "mc:AlternateContent",
];

const HYPERLINK_CHILDREN: &[&str] = &[
    "w:r", "w:proofErr", "w:bookmarkStart", "w:bookmarkEnd", "w:ins", "w:del", "w:fldSimple", "w:sdt",
];

const TABLE_CHILDREN: &[&str] = &[
    "w:tblPr", "w:tblGrid", "w:tr", "w:bookmarkStart", "w:bookmarkEnd", "w:sdt", "w:customXml",
];

const ROW_CHILDREN: &[&str] = &[
    "w:trPr", "w:tblPrEx", "w:tc", "w:sdt", "w:bookmarkStart", "w:bookmarkEnd", "w:customXml",
];

const CELL_CHILDREN: &[&str] = &[
    "w:tcPr", "w:p", "w:tbl", "w:sdt", "w:altChunk", "w:bookmarkStart", "w:bookmarkEnd", "w:customXml",
];

/// Elements whose children are character data
const TEXT_HOLDERS: &[&str] = &["w:t", "w:instrText", "w:delText"];

impl BasicValidator {
    fn allowed_children(tag: &str) -> Option<&'static [&'static str]> {
        match tag {
            "w:p" => Some(PARAGRAPH_CHILDREN),
            "w:r" => Some(RUN_CHILDREN),
            "w:hyperlink" => Some(HYPERLINK_CHILDREN),
            "w:tbl" => Some(TABLE_CHILDREN),
            "w:tr" => Some(ROW_CHILDREN),
            "w:tc" => Some(CELL_CHILDREN),
            _ => None,
        }
    }

    /// Properties element that must come first, if any
    fn leading_properties(tag: &str) -> Option<&'static str> {
        match tag {
            "w:p" => Some("w:pPr"),
            "w:r" => Some("w:rPr"),
            "w:tbl" => Some("w:tblPr"),
            "w:tr" => Some("w:trPr"),
            "w:tc" => Some("w:tcPr"),
            _ => None,
        }
    }

    fn check(&self, elem: &Element, errors: &mut Vec<String>) {
        if elem.tag == OPAQUE_TAG {
            return;
        }
        let allowed = Self::allowed_children(&elem.tag);
        let holds_text = TEXT_HOLDERS.contains(&elem.tag.as_str());

        for (idx, child) in elem.children.iter().enumerate() {
            match child {
                Node::Text(text) => {
                    if !holds_text && !text.is_whitespace() {
                        errors.push(format!("<{}> must not contain character data", elem.tag));
                    }
                }
                Node::Element(child) => {
                    if holds_text {
                        errors.push(format!("<{}> must not contain <{}>", elem.tag, child.tag));
                        continue;
                    }
                    if let Some(allowed) = allowed
                        && !allowed.contains(&child.tag.as_str())
                    {
                        errors.push(format!("<{}> must not contain <{}>", elem.tag, child.tag));
                    }
                    if idx > 0 && Self::leading_properties(&elem.tag) == Some(child.tag.as_str()) {
                        errors.push(format!("<{}> must be the first child of <{}>", child.tag, elem.tag));
                    }
                    self.check(child, errors);
                }
            }
        }

        if elem.tag == "w:tc" && !elem.has_child("w:p") {
            errors.push("<w:tc> must contain at least one <w:p>".to_string());
        }
    }
}

impl ElementValidator for BasicValidator {
    fn validate_element(&self, element: &Element) -> Vec<String> {
        let mut errors = Vec::new();
        self.check(element, &mut errors);
        errors
    }
}
