//! Fixed-size declaration x element table.

use std::fmt;

use super::Cell;
use crate::ids::{DeclarationId, ElementId};
use crate::{Error, Result};

/// Matrix dimensions, fixed once the matrix is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    /// Number of declarations.
    pub rows: usize,
    /// Number of relevant elements.
    pub cols: usize,
}

impl Dimensions {
    /// Create a dimension pair.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub const fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns true if either side is zero.
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// Declaration x element incidence matrix.
///
/// Rows are declarations, columns are relevant elements. Cells are stored
/// row-major. Once built, cells only move from `Applies` to `Covered`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceMatrix {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl IncidenceMatrix {
    /// Create an all-`Empty` matrix.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![Cell::Empty; dims.area()],
        }
    }

    /// Build a matrix from boolean rows (`true` = applies).
    ///
    /// Rows shorter than the longest row are padded with `Empty`.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let cols = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut matrix = Self::new(Dimensions::new(rows.len(), cols));
        for (r, row) in rows.iter().enumerate() {
            for (c, &applies) in row.as_ref().iter().enumerate() {
                if applies {
                    matrix.set_applies(DeclarationId::new(r), ElementId::new(c));
                }
            }
        }
        matrix
    }

    /// Matrix dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of rows (declarations).
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    /// Number of columns (elements).
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.dims.rows && col < self.dims.cols);
        row * self.dims.cols + col
    }

    /// Cell state at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, row: DeclarationId, col: ElementId) -> Cell {
        self.cell(row.index(), col.index())
    }

    #[inline]
    pub(crate) fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.offset(row, col)]
    }

    /// Mark a cell as `Applies`. Only the builder populates cells.
    pub(crate) fn set_applies(&mut self, row: DeclarationId, col: ElementId) {
        let offset = self.offset(row.index(), col.index());
        self.cells[offset] = Cell::Applies;
    }

    /// Mark a cell as `Covered`.
    ///
    /// Returns `true` if the cell was `Applies` (newly covered) and `false`
    /// if it was already `Covered`. Covering an `Empty` cell is refused.
    pub(crate) fn cover(&mut self, row: usize, col: usize) -> Result<bool> {
        let offset = self.offset(row, col);
        match self.cells[offset] {
            Cell::Applies => {
                self.cells[offset] = Cell::Covered;
                Ok(true)
            }
            Cell::Covered => Ok(false),
            Cell::Empty => Err(Error::IllegalTransition {
                row: DeclarationId::new(row),
                col: ElementId::new(col),
            }),
        }
    }

    /// Count cells in the given state.
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Returns true while at least one cell is `Applies`.
    pub fn has_uncovered(&self) -> bool {
        self.cells.contains(&Cell::Applies)
    }

    /// First `Applies` cell in row-major order.
    pub fn first_uncovered(&self) -> Option<(DeclarationId, ElementId)> {
        let offset = self.cells.iter().position(|&c| c == Cell::Applies)?;
        Some((
            DeclarationId::new(offset / self.dims.cols),
            ElementId::new(offset % self.dims.cols),
        ))
    }

    /// Iterate over every applicable (`Applies` or `Covered`) cell, row-major.
    pub fn applicable_cells(&self) -> impl Iterator<Item = (DeclarationId, ElementId)> + '_ {
        let cols = self.dims.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_applicable())
            .map(move |(offset, _)| {
                (
                    DeclarationId::new(offset / cols),
                    ElementId::new(offset % cols),
                )
            })
    }
}

impl fmt::Display for IncidenceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.dims.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cell(row, col))?;
            }
        }
        Ok(())
    }
}
