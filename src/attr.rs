//! Attribute system for document elements
//!
//! Attributes are ordered `(qualified name, value)` pairs. Order is kept
//! because the host format is written out in insertion order.

use compact_str::CompactString;

/// Qualified element or attribute name, e.g. `w:p` or `w:val`.
///
/// Host-format names are short, so they almost always stay inline.
pub type Tag = CompactString;

/// Element attributes as simple key-value pairs
pub type Attrs = Vec<(Tag, String)>;

/// The attribute that carries the value of most leaf elements.
pub const VAL: &str = "w:val";

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Get an attribute value parsed as an unsigned integer
    fn get_attr_u32(&self, name: &str) -> Option<u32> {
        self.get_attr(name).and_then(|v| v.trim().parse().ok())
    }

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<Tag>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<Tag>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| *k == name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_operations() {
        let mut attrs: Attrs = Vec::new();

        attrs.set_attr("w:val", "Heading1");
        attrs.set_attr("w:numId", "7");
        assert_eq!(attrs.len(), 2);

        assert_eq!(attrs.get_attr("w:val"), Some("Heading1"));
        assert_eq!(attrs.get_attr_u32("w:numId"), Some(7));
        assert_eq!(attrs.get_attr_u32("w:val"), None);
        assert_eq!(attrs.get_attr("r:id"), None);

        // Update keeps position
        attrs.set_attr("w:val", "Heading2");
        assert_eq!(attrs[0].1, "Heading2");
        assert_eq!(attrs.len(), 2);

        let removed = attrs.remove_attr("w:numId");
        assert_eq!(removed.as_deref(), Some("7"));
        assert!(!attrs.has_attr("w:numId"));
        assert_eq!(attrs.len(), 1);
    }
}
