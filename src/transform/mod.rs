//! Whole-document passes and validation.
//!
//! # Module Structure
//!
//! - `Transform` - Core trait for in-place document passes
//! - `CollapseChunkSpacing` - Removes blank lines around imported chunks
//! - `ElementValidator` / `BasicValidator` - Inner-content validation
//!
//! # Example
//!
//! ```ignore
//! use docfill::transform::{CollapseChunkSpacing, Transform};
//!
//! let removed = CollapseChunkSpacing.apply(&mut doc);
//! ```

mod spacing;
mod validator;

pub use spacing::{is_blank_paragraph, CollapseChunkSpacing};
pub use validator::{BasicValidator, ElementValidator, OPAQUE_TAG};

use crate::node::Document;

/// A pass that rewrites a document in place.
pub trait Transform {
    /// Apply the pass and return how many nodes it changed.
    fn apply(&self, doc: &mut Document) -> usize;
}

// =============================================================================
// IdentityTransform
// =============================================================================

/// Pass that leaves the document unchanged.
///
/// Useful where a pass is chosen conditionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl Transform for IdentityTransform {
    #[inline]
    fn apply(&self, _doc: &mut Document) -> usize {
        0
    }
}
