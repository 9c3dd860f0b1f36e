//! Incidence matrix cell state.

use std::fmt;

/// State of one (declaration, element) pair.
///
/// After the matrix is built the only transition is `Applies -> Covered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    /// The declaration does not apply to the element.
    #[default]
    Empty = 0,
    /// The declaration applies and no rectangle claims the pair yet.
    Applies = 1,
    /// The declaration applies and an emitted rectangle already claims it.
    Covered = 2,
}

impl Cell {
    /// Returns true if the declaration applies, covered or not.
    #[inline]
    pub fn is_applicable(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// Returns true for cells counted as conflict by the refinement heuristic.
    #[inline]
    pub fn is_conflict(self) -> bool {
        !matches!(self, Cell::Applies)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
