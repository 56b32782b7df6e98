//! List numbering definitions.
//!
//! Each list block gets its own abstract definition and its own instance,
//! even when an identical one already exists, so every list counts from 1
//! on its own.
//!
//! # Id allocation
//!
//! No counter is kept between calls. The next free ids are recomputed
//! from the numbering part each time, which keeps documents independent
//! of each other but means allocation against one document must be
//! serialized by the caller. `&mut Document` enforces that in safe code.

use log::debug;

use crate::attr::{AttrsExt, VAL};
use crate::node::{Document, Element};

/// Deepest list level the host format supports.
pub const MAX_LEVEL: u8 = 8;

const ABSTRACT_NUM: &str = "w:abstractNum";
const ABSTRACT_NUM_ID: &str = "w:abstractNumId";
const NUM: &str = "w:num";
const NUM_ID: &str = "w:numId";

/// Left indent step per level, in twips.
const INDENT_STEP: u32 = 720;
/// Hanging indent of every level, in twips.
const HANGING: u32 = 360;

const ORDERED_FORMATS: [&str; 3] = ["decimal", "lowerLetter", "lowerRoman"];
/// Bullet glyph and the font that draws it.
const BULLETS: [(&str, &str); 3] = [
    ("\u{F0B7}", "Symbol"),
    ("o", "Courier New"),
    ("\u{F0A7}", "Wingdings"),
];

/// A freshly allocated numbering definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingInstance {
    pub abstract_id: u32,
    pub num_id: u32,
    pub multi_level: bool,
}

impl NumberingInstance {
    /// Level an item is rendered at: clamped to the supported range and
    /// always 0 for single-level lists
    pub fn effective_level(&self, requested: u8) -> u8 {
        effective_level(requested, self.multi_level)
    }
}

/// Clamp a requested list level to `0..=MAX_LEVEL`, or 0 when the list is
/// single-level.
pub fn effective_level(requested: u8, multi_level: bool) -> u8 {
    if multi_level { requested.min(MAX_LEVEL) } else { 0 }
}

/// Next free `(abstract id, instance id)`, each `max(existing) + 1`.
///
/// An existing id of `u32::MAX` has no successor and is left out of the
/// maximum.
pub fn next_ids(doc: &Document) -> (u32, u32) {
    let Some(numbering) = doc.numbering() else {
        return (1, 1);
    };
    let next_of = |tag: &str, attr: &str| {
        numbering
            .children_elements()
            .filter(|e| e.tag == tag)
            .filter_map(|e| e.attrs.get_attr_u32(attr))
            .filter_map(|id| id.checked_add(1))
            .max()
            .unwrap_or(1)
    };
    (next_of(ABSTRACT_NUM, ABSTRACT_NUM_ID), next_of(NUM, NUM_ID))
}

/// Allocate and insert a new numbering definition for a list of
/// `item_count` items.
pub fn allocate(doc: &mut Document, ordered: bool, item_count: usize) -> NumberingInstance {
    let multi_level = item_count > 1;
    let (abstract_id, num_id) = next_ids(doc);

    let definition = abstract_definition(abstract_id, ordered, multi_level);
    let instance = Element::new(NUM)
        .attr(NUM_ID, num_id.to_string())
        .child(Element::with_val(ABSTRACT_NUM_ID, abstract_id.to_string()))
        .child(
            Element::new("w:lvlOverride")
                .attr("w:ilvl", "0")
                .child(Element::with_val("w:startOverride", "1")),
        );

    let numbering = doc.numbering_mut();
    let abstract_pos = last_position(numbering, ABSTRACT_NUM).map_or(0, |p| p + 1);
    numbering.insert_elem(abstract_pos, definition);
    match last_position(numbering, NUM) {
        Some(p) => numbering.insert_elem(p + 1, instance),
        None => numbering.push_elem(instance),
    }

    debug!("allocated numbering abstract={abstract_id} num={num_id} ordered={ordered} multi_level={multi_level}");
    NumberingInstance {
        abstract_id,
        num_id,
        multi_level,
    }
}

fn last_position(parent: &Element, tag: &str) -> Option<usize> {
    parent.children.iter().rposition(|n| n.is_tag(tag))
}

/// Random 8-hex-digit code.
///
/// Word merges definitions that share `w:nsid`; a random code keeps a new
/// list from being folded into a look-alike that already exists.
fn discriminator() -> String {
    format!("{:08X}", rand::random::<u32>())
}

fn abstract_definition(abstract_id: u32, ordered: bool, multi_level: bool) -> Element {
    let mut def = Element::new(ABSTRACT_NUM)
        .attr(ABSTRACT_NUM_ID, abstract_id.to_string())
        .child(Element::with_val("w:nsid", discriminator()))
        .child(Element::with_val(
            "w:multiLevelType",
            if multi_level { "multilevel" } else { "singleLevel" },
        ))
        .child(Element::with_val("w:tmpl", discriminator()));

    let top = if multi_level { MAX_LEVEL } else { 0 };
    for level in 0..=top {
        def.push_elem(level_definition(level, ordered));
    }
    def
}

fn level_definition(level: u8, ordered: bool) -> Element {
    let rotation = usize::from(level % 3);
    let lvl = Element::new("w:lvl")
        .attr("w:ilvl", level.to_string())
        .child(Element::with_val("w:start", "1"));

    let lvl = if ordered {
        let text: String = (1..=u32::from(level) + 1).map(|n| format!("%{n}.")).collect();
        lvl.child(Element::with_val("w:numFmt", ORDERED_FORMATS[rotation]))
            .child(Element::with_val("w:lvlText", text))
    } else {
        let (glyph, _) = BULLETS[rotation];
        lvl.child(Element::with_val("w:numFmt", "bullet"))
            .child(Element::with_val("w:lvlText", glyph))
    };

    let lvl = lvl.child(Element::with_val("w:lvlJc", "left")).child(
        Element::new("w:pPr").child(
            Element::new("w:ind")
                .attr("w:left", (INDENT_STEP * (u32::from(level) + 1)).to_string())
                .attr("w:hanging", HANGING.to_string()),
        ),
    );

    if ordered {
        lvl
    } else {
        let (_, font) = BULLETS[rotation];
        lvl.child(
            Element::new("w:rPr").child(
                Element::new("w:rFonts")
                    .attr("w:ascii", font)
                    .attr("w:hAnsi", font)
                    .attr("w:hint", "default"),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `(level, format, text)` of every level of an abstract definition.
    fn describe_levels(def: &Element) -> Vec<(u8, String, String)> {
        def.children_elements()
            .filter(|e| e.tag == "w:lvl")
            .map(|lvl| {
                let level = lvl.attrs.get_attr_u32("w:ilvl").and_then(|l| u8::try_from(l).ok()).unwrap_or(0);
                let value = |tag: &str| {
                    lvl.find_child(tag)
                        .and_then(|e| e.attrs.get_attr(VAL))
                        .unwrap_or_default()
                        .to_string()
                };
                (level, value("w:numFmt"), value("w:lvlText"))
            })
            .collect()
    }

    fn doc() -> Document {
        Document::from_body(Element::new("w:body"))
    }

    fn abstract_def(doc: &Document, id: u32) -> &Element {
        doc.numbering()
            .unwrap()
            .children_elements()
            .find(|e| e.tag == ABSTRACT_NUM && e.attrs.get_attr_u32(ABSTRACT_NUM_ID) == Some(id))
            .unwrap()
    }

    #[test]
    fn test_next_ids_independent() {
        let numbering = Element::new("w:numbering")
            .child(Element::new(ABSTRACT_NUM).attr(ABSTRACT_NUM_ID, "4"))
            .child(Element::new(ABSTRACT_NUM).attr(ABSTRACT_NUM_ID, "bogus"))
            .child(Element::new(NUM).attr(NUM_ID, "9"));
        let doc = doc().with_numbering(numbering);
        assert_eq!(next_ids(&doc), (5, 10));
        assert_eq!(next_ids(&self::doc()), (1, 1));
    }

    #[test]
    fn test_next_ids_skip_ids_without_successor() {
        let numbering = Element::new("w:numbering")
            .child(Element::new(ABSTRACT_NUM).attr(ABSTRACT_NUM_ID, "4294967295"))
            .child(Element::new(ABSTRACT_NUM).attr(ABSTRACT_NUM_ID, "7"))
            .child(Element::new(NUM).attr(NUM_ID, "4294967295"));
        let mut doc = doc().with_numbering(numbering);
        assert_eq!(next_ids(&doc), (8, 1));

        let inst = allocate(&mut doc, false, 1);
        assert_eq!((inst.abstract_id, inst.num_id), (8, 1));
    }

    #[test]
    fn test_sequential_lists_get_distinct_ids() {
        let mut doc = doc();
        let ids: Vec<_> = (0..5).map(|_| allocate(&mut doc, true, 3).num_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let numbering = doc.numbering().unwrap();
        for num in numbering.children_elements().filter(|e| e.tag == NUM) {
            let start = num
                .find_child("w:lvlOverride")
                .and_then(|o| o.find_child("w:startOverride"))
                .and_then(Element::val);
            assert_eq!(start, Some("1"));
        }
    }

    #[test]
    fn test_abstracts_precede_instances() {
        let existing = Element::new("w:numbering")
            .child(Element::new(ABSTRACT_NUM).attr(ABSTRACT_NUM_ID, "0"))
            .child(Element::new(NUM).attr(NUM_ID, "1"));
        let mut doc = doc().with_numbering(existing);

        allocate(&mut doc, false, 1);
        allocate(&mut doc, true, 2);

        let order: Vec<_> = doc
            .numbering()
            .unwrap()
            .children_elements()
            .map(|e| {
                let id = e.get_attr(ABSTRACT_NUM_ID).or(e.get_attr(NUM_ID)).unwrap_or("?");
                format!("{}{}", e.tag, id)
            })
            .collect();
        assert_eq!(
            order,
            vec!["w:abstractNum0", "w:abstractNum1", "w:abstractNum2", "w:num1", "w:num2", "w:num3"]
        );
    }

    #[test]
    fn test_ordered_levels() {
        let mut doc = doc();
        let inst = allocate(&mut doc, true, 2);
        let levels = describe_levels(abstract_def(&doc, inst.abstract_id));

        assert_eq!(levels.len(), 9);
        assert_eq!(levels[0], (0, "decimal".to_string(), "%1.".to_string()));
        assert_eq!(levels[1], (1, "lowerLetter".to_string(), "%1.%2.".to_string()));
        assert_eq!(levels[2], (2, "lowerRoman".to_string(), "%1.%2.%3.".to_string()));
        assert_eq!(levels[3].1, "decimal");

        let def = abstract_def(&doc, inst.abstract_id);
        let nsid = def.find_child("w:nsid").and_then(Element::val).unwrap();
        assert_eq!(nsid.len(), 8);
        assert!(nsid.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(def.find_child("w:multiLevelType").and_then(Element::val), Some("multilevel"));
    }

    #[test]
    fn test_single_item_list_is_single_level() {
        let mut doc = doc();
        let inst = allocate(&mut doc, false, 1);
        assert!(!inst.multi_level);
        assert_eq!(inst.effective_level(5), 0);

        let def = abstract_def(&doc, inst.abstract_id);
        assert_eq!(def.find_child("w:multiLevelType").and_then(Element::val), Some("singleLevel"));
        let levels = describe_levels(def);
        assert_eq!(levels, vec![(0, "bullet".to_string(), "\u{F0B7}".to_string())]);
    }

    #[test]
    fn test_indents() {
        let lvl = level_definition(2, false);
        let ind = lvl.find_child("w:pPr").and_then(|p| p.find_child("w:ind")).unwrap();
        assert_eq!(ind.get_attr("w:left"), Some("2160"));
        assert_eq!(ind.get_attr("w:hanging"), Some("360"));
        assert_eq!(lvl.find_child("w:lvlJc").and_then(Element::val), Some("left"));
    }

    #[test]
    fn test_effective_level_clamps() {
        assert_eq!(effective_level(12, true), MAX_LEVEL);
        assert_eq!(effective_level(3, true), 3);
        assert_eq!(effective_level(3, false), 0);
    }
}
