//! docfill - Slot-based document assembly for WordprocessingML trees
//!
//! ## Core Concepts
//!
//! **Slots**: A template marks insertion points with content controls
//! (`w:sdt`) whose alias is the slot title. Content is composed from an
//! abstract [`Block`] model and appended to the slot, which can then be
//! unwrapped so its content takes the control's place.
//!
//! **Composition**: Paragraphs, lists, tables, attachments and markup
//! fragments are turned into host-format elements. Lists get their own
//! numbering definitions, tables are laid out in proportional widths and
//! contain failures per cell.
//!
//! **Collaborators**: Picture embedding and markup conversion touch
//! package resources this crate does not own, so they are supplied by the
//! caller through [`PictureComposer`] and [`MarkupConverter`].
//!
//! ## Modules
//! - `node`: Element/Node/Text/Document tree
//! - `slot`: Locating, clearing, filling and unwrapping slots
//! - `numbering`: List numbering definitions
//! - `run`: Run and paragraph composition
//! - `table`: Table layout
//! - `compose`: The block-to-slot orchestrator
//! - `transform`: Whole-document passes and validation
//! - `render`: XML output
//!
//! ## Usage
//!
//! ```ignore
//! use docfill::prelude::*;
//!
//! let mut composer = Composer::new(
//!     ComposeConfig::default().with_unwrap_slot(true),
//!     &BasicValidator,
//!     Collaborators::new(&mut pictures, &mut markup),
//! );
//! composer.render(&mut doc, "Summary", &blocks)?;
//!
//! let xml = render_document(&doc, &RenderConfig::default());
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Node types: Document, Element, Node, Text
pub mod node;

/// Attribute types
pub mod attr;

/// Error types
pub mod error;

/// Abstract content model
pub mod model;

/// Collaborator traits
pub mod collab;

/// Measurement units
pub mod units;

/// Font colour names
pub mod color;

/// Slot lookup and mutation
pub mod slot;

/// List numbering
pub mod numbering;

/// Runs and paragraphs
pub mod run;

/// Table layout
pub mod table;

/// Composition settings
pub mod config;

/// Block placement
pub mod compose;

/// Document passes and validation
pub mod transform;

/// XML rendering
pub mod render;

/// Prelude for common imports
pub mod prelude;

mod macros;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Document, Element, Node, NodePath, Relationships, Text};

// Model
pub use model::{
    Attachment, AttachmentKind, Block, Cell, ImageRun, List, ListItem, MarkupFragment, Paragraph,
    Row, Run, RunStyle, Shading, Table, TextRun,
};

// Composition
pub use collab::{Collaborators, HyperlinkAllocator, MarkupConverter, PictureComposer};
pub use compose::{Composer, RenderReport};
pub use config::ComposeConfig;
pub use numbering::NumberingInstance;
pub use run::RunComposer;
pub use slot::Slot;
pub use table::{BuiltTable, ResolvedWidth, TableLayoutEngine};

// Transform
pub use transform::{BasicValidator, CollapseChunkSpacing, ElementValidator, Transform};

// Attribute types
pub use attr::{Attrs, AttrsExt, Tag};

// Error types
pub use error::{DocfillError, DocfillResult};
