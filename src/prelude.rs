//! Prelude module for common imports.
//!
//! ```ignore
//! use docfill::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Document, Element, Node, Text};

// Model
pub use crate::model::{
    Attachment, AttachmentKind, Block, Cell, List, ListItem, MarkupFragment, Paragraph, Row, Run,
    RunStyle, Shading, Table,
};

// Composition
pub use crate::collab::{Collaborators, HyperlinkAllocator, MarkupConverter, PictureComposer};
pub use crate::compose::{Composer, RenderReport};
pub use crate::config::ComposeConfig;

// Transform
pub use crate::transform::{
    BasicValidator, CollapseChunkSpacing, ElementValidator, IdentityTransform, Transform,
};

// Attributes
pub use crate::attr::{Attrs, AttrsExt, Tag};

// Error
pub use crate::error::{DocfillError, DocfillResult};

// Render
pub use crate::render::{render_document, render_numbering, render_relationships, RenderConfig};
