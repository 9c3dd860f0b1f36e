//! Greedy shrinking of a candidate rectangle.
//!
//! Starting from the whole matrix, the row or column contributing the most
//! proportional conflict is dropped until no `Empty` cell remains inside
//! `rows x cols`. Conflict counts every cell that is not `Applies`, so
//! already-covered cells are avoided but not forbidden.

use crate::matrix::{Cell, IncidenceMatrix};

/// Result of one refinement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Refined {
    /// `rows x cols` is free of `Empty` cells. Both sides are non-empty.
    Rectangle {
        rows: Vec<usize>,
        cols: Vec<usize>,
        steps: usize,
    },
    /// One side was shrunk to nothing before the rectangle became clean.
    Degenerate {
        rows: usize,
        cols: usize,
        steps: usize,
    },
    /// The step limit was reached with `Empty` cells still inside.
    StepLimit { steps: usize },
}

/// Shrink the whole matrix to an `Empty`-free rectangle.
///
/// Every step removes exactly one row or one column, so the loop runs at
/// most `rows + cols` times even without a `limit`.
pub(crate) fn refine(matrix: &IncidenceMatrix, limit: Option<usize>) -> Refined {
    let mut rows: Vec<usize> = (0..matrix.rows()).collect();
    let mut cols: Vec<usize> = (0..matrix.cols()).collect();
    let mut steps = 0;

    if rows.is_empty() || cols.is_empty() {
        return Refined::Degenerate {
            rows: rows.len(),
            cols: cols.len(),
            steps,
        };
    }

    while contains_empty(matrix, &rows, &cols) {
        if let Some(limit) = limit
            && steps >= limit
        {
            return Refined::StepLimit { steps };
        }

        let (row_pos, row_conflict) = max_conflict(&rows, |r| {
            cols.iter().filter(|&&c| matrix.cell(r, c).is_conflict()).count()
        });
        let (col_pos, col_conflict) = max_conflict(&cols, |c| {
            rows.iter().filter(|&&r| matrix.cell(r, c).is_conflict()).count()
        });

        // row_conflict / |cols| > col_conflict / |rows|, compared exactly.
        // Ties drop the column.
        if row_conflict * rows.len() > col_conflict * cols.len() {
            rows.remove(row_pos);
        } else {
            cols.remove(col_pos);
        }
        steps += 1;

        if rows.is_empty() || cols.is_empty() {
            return Refined::Degenerate {
                rows: rows.len(),
                cols: cols.len(),
                steps,
            };
        }
    }

    Refined::Rectangle { rows, cols, steps }
}

/// Position (within `indices`) and count of the first index with the
/// highest conflict.
fn max_conflict(indices: &[usize], conflict: impl Fn(usize) -> usize) -> (usize, usize) {
    let mut best = (0, 0);
    for (pos, &index) in indices.iter().enumerate() {
        let count = conflict(index);
        if count > best.1 {
            best = (pos, count);
        }
    }
    best
}

fn contains_empty(matrix: &IncidenceMatrix, rows: &[usize], cols: &[usize]) -> bool {
    rows.iter()
        .any(|&r| cols.iter().any(|&c| matrix.cell(r, c) == Cell::Empty))
}

/// Returns true if at least one cell of `rows x cols` is still `Applies`.
pub(crate) fn has_uncovered(matrix: &IncidenceMatrix, rows: &[usize], cols: &[usize]) -> bool {
    rows.iter()
        .any(|&r| cols.iter().any(|&c| matrix.cell(r, c) == Cell::Applies))
}
