//! Composition settings.

use crate::node::Document;
use crate::slot::EMPTY_PLACEHOLDER;

/// Settings for [`Composer`](crate::Composer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeConfig {
    /// Text that marks a slot as untouched.
    pub placeholder_text: String,
    /// Empty the slot first when it still shows `placeholder_text`.
    pub clear_placeholder: bool,
    /// Replace the slot wrapper by its content once composed.
    pub unwrap_slot: bool,
    /// Writable page width in twips. Read from the document when unset.
    pub page_width: Option<u32>,
    /// Ask for inline pictures without frames.
    pub flatten_images: bool,
}

impl ComposeConfig {
    pub fn with_placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    pub fn with_clear_placeholder(mut self, clear: bool) -> Self {
        self.clear_placeholder = clear;
        self
    }

    pub fn with_unwrap_slot(mut self, unwrap: bool) -> Self {
        self.unwrap_slot = unwrap;
        self
    }

    pub fn with_page_width(mut self, twips: u32) -> Self {
        self.page_width = Some(twips);
        self
    }

    pub fn with_flatten_images(mut self, flatten: bool) -> Self {
        self.flatten_images = flatten;
        self
    }

    /// Page width to lay tables out against.
    pub fn page_width_for(&self, doc: &Document) -> u32 {
        self.page_width.unwrap_or_else(|| doc.page_width())
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            placeholder_text: EMPTY_PLACEHOLDER.to_string(),
            clear_placeholder: true,
            unwrap_slot: false,
            page_width: None,
            flatten_images: false,
        }
    }
}
