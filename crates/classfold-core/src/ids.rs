//! Typed row and column indices.
//!
//! Declarations and elements are referenced by position inside the incidence
//! matrix. The newtypes keep a row index from being used as a column index and
//! tie every index to the tables built once by the matrix builder.

use std::fmt;

/// Row index of a declaration in the incidence matrix.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclarationId(usize);

impl DeclarationId {
    /// Creates an id from a raw row index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw row index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// Column index of a relevant element in the incidence matrix.
///
/// Assigned in document pre-order, restricted to relevant elements.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(usize);

impl ElementId {
    /// Creates an id from a raw column index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw column index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_index() {
        assert!(DeclarationId::new(0) < DeclarationId::new(3));
        assert!(ElementId::new(2) > ElementId::new(1));
    }

    #[test]
    fn ids_display() {
        assert_eq!(DeclarationId::new(4).to_string(), "d4");
        assert_eq!(ElementId::new(7).to_string(), "e7");
    }
}
