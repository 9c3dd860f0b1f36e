//! Cover items and decomposition results.

use std::fmt;

use crate::ids::{DeclarationId, ElementId};

/// One emitted rectangle: a declaration subset crossed with an element subset.
///
/// Both sides are stored in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverItem {
    declarations: Vec<DeclarationId>,
    elements: Vec<ElementId>,
}

impl CoverItem {
    /// Create an item, sorting and deduplicating both sides.
    pub fn new(
        declarations: impl IntoIterator<Item = DeclarationId>,
        elements: impl IntoIterator<Item = ElementId>,
    ) -> Self {
        let mut declarations: Vec<_> = declarations.into_iter().collect();
        let mut elements: Vec<_> = elements.into_iter().collect();
        declarations.sort_unstable();
        declarations.dedup();
        elements.sort_unstable();
        elements.dedup();
        Self {
            declarations,
            elements,
        }
    }

    pub(crate) fn from_indices(rows: Vec<usize>, cols: Vec<usize>) -> Self {
        Self::new(
            rows.into_iter().map(DeclarationId::new),
            cols.into_iter().map(ElementId::new),
        )
    }

    /// Declaration (row) side, ascending.
    pub fn declarations(&self) -> &[DeclarationId] {
        &self.declarations
    }

    /// Element (column) side, ascending.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Number of cells in the rectangle.
    pub fn area(&self) -> usize {
        self.declarations.len() * self.elements.len()
    }

    /// Returns true if either side is empty.
    pub fn is_degenerate(&self) -> bool {
        self.declarations.is_empty() || self.elements.is_empty()
    }

    /// Returns true if the rectangle contains `(declaration, element)`.
    pub fn contains(&self, declaration: DeclarationId, element: ElementId) -> bool {
        self.declarations.binary_search(&declaration).is_ok()
            && self.elements.binary_search(&element).is_ok()
    }

    /// Iterate every cell of the rectangle, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (DeclarationId, ElementId)> + '_ {
        self.declarations
            .iter()
            .flat_map(|&d| self.elements.iter().map(move |&e| (d, e)))
    }
}

impl fmt::Display for CoverItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.declarations.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "] x [")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, "]")
    }
}

/// Why an extraction fell back to a single-cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// Refinement emptied the row or column set.
    Degenerate,
    /// The refinement step limit was reached.
    StepLimit,
    /// The refined rectangle held only already-covered cells.
    NoProgress,
}

/// Counters collected while decomposing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecompositionStats {
    /// Emitted rectangles.
    pub rectangles: usize,
    /// Total refinement steps across all extractions.
    pub refinement_steps: usize,
    /// Extractions that fell back because refinement degenerated.
    pub degenerate_fallbacks: usize,
    /// Extractions that fell back because of the step limit.
    pub step_limit_fallbacks: usize,
    /// Extractions that fell back because the rectangle covered nothing new.
    pub no_progress_fallbacks: usize,
    /// Cells moved from `Applies` to `Covered`.
    pub covered_cells: usize,
    /// Cells claimed again by a later rectangle.
    pub redundant_cells: usize,
}

impl DecompositionStats {
    /// Total single-cell fallbacks.
    pub fn fallbacks(&self) -> usize {
        self.degenerate_fallbacks + self.step_limit_fallbacks + self.no_progress_fallbacks
    }

    pub(crate) fn record_fallback(&mut self, reason: FallbackReason) {
        match reason {
            FallbackReason::Degenerate => self.degenerate_fallbacks += 1,
            FallbackReason::StepLimit => self.step_limit_fallbacks += 1,
            FallbackReason::NoProgress => self.no_progress_fallbacks += 1,
        }
    }
}

/// The ordered cover produced by the decomposer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cover {
    items: Vec<CoverItem>,
    stats: DecompositionStats,
}

impl Cover {
    pub(crate) fn new(items: Vec<CoverItem>, stats: DecompositionStats) -> Self {
        Self { items, stats }
    }

    /// Items in discovery order.
    pub fn items(&self) -> &[CoverItem] {
        &self.items
    }

    /// Decomposition counters.
    pub fn stats(&self) -> &DecompositionStats {
        &self.stats
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cover has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, CoverItem> {
        self.items.iter()
    }

    /// Returns true if some item contains `(declaration, element)`.
    pub fn covers(&self, declaration: DeclarationId, element: ElementId) -> bool {
        self.items.iter().any(|i| i.contains(declaration, element))
    }
}

impl<'a> IntoIterator for &'a Cover {
    type Item = &'a CoverItem;
    type IntoIter = std::slice::Iter<'a, CoverItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
