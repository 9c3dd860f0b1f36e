//! Rectangle cover decomposition.
//!
//! The decomposer repeatedly extracts a rectangle whose cells all apply and
//! marks it covered, until no `Applies` cell is left. Extraction is a greedy
//! shrink of the whole matrix; when the shrink cannot produce a rectangle
//! that makes progress, a single uncovered cell is emitted on its own.
//!
//! # Determinism
//!
//! Rows are visited in declaration order and columns in document order.
//! Among equal conflicts the lowest index is removed, and equal ratios remove
//! a column. Repeated runs on the same matrix yield the same cover.
//!
//! # Termination
//!
//! Every emitted rectangle covers at least one `Applies` cell, so the number
//! of extractions is bounded by the initial `Applies` count.
//!
//! Refinement only degenerates once it is down to one column whose cells all
//! conflict. Each removed row or column had at least the conflict of the ones
//! kept, so that state is only reached from a matrix with no `Applies` cell,
//! which is never refined. The degenerate fallback therefore does not fire
//! in practice; it stays as the guard behind the progress bound.

mod cover;
mod refine;

pub use cover::{Cover, CoverItem, DecompositionStats, FallbackReason};

use crate::ids::{DeclarationId, ElementId};
use crate::logging::{PerfSpan, targets};
use crate::matrix::{Cell, IncidenceMatrix};
use crate::{Error, Result};
use refine::{Refined, has_uncovered, refine};

/// Tuning for the decomposer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecomposeOptions {
    /// Maximum refinement steps per extraction before falling back to a
    /// single cell. `None` relies on the natural `rows + cols` bound.
    pub max_refinement_steps: Option<usize>,
}

impl DecomposeOptions {
    /// Options with a per-extraction refinement step limit.
    pub fn with_step_limit(limit: usize) -> Self {
        Self {
            max_refinement_steps: Some(limit),
        }
    }
}

/// Exclusive, step-wise decomposer over an incidence matrix.
pub struct Decomposer<'m> {
    matrix: &'m mut IncidenceMatrix,
    options: DecomposeOptions,
    stats: DecompositionStats,
    iterations: usize,
    max_iterations: usize,
}

impl<'m> Decomposer<'m> {
    /// Create a decomposer with default options.
    pub fn new(matrix: &'m mut IncidenceMatrix) -> Self {
        Self::with_options(matrix, DecomposeOptions::default())
    }

    /// Create a decomposer with explicit options.
    pub fn with_options(matrix: &'m mut IncidenceMatrix, options: DecomposeOptions) -> Self {
        let max_iterations = matrix.count(Cell::Applies);
        Self {
            matrix,
            options,
            stats: DecompositionStats::default(),
            iterations: 0,
            max_iterations,
        }
    }

    /// Read access to the matrix between steps.
    pub fn matrix(&self) -> &IncidenceMatrix {
        &*self.matrix
    }

    /// Counters collected so far.
    pub fn stats(&self) -> &DecompositionStats {
        &self.stats
    }

    /// Extract the next rectangle, or `None` once every cell is covered.
    pub fn next_item(&mut self) -> Option<Result<CoverItem>> {
        if !self.matrix.has_uncovered() {
            return None;
        }

        self.iterations += 1;
        if self.iterations > self.max_iterations {
            return Some(Err(Error::NonConvergence {
                iterations: self.iterations,
            }));
        }

        Some(self.extract())
    }

    /// Run to completion.
    pub fn run(mut self) -> Result<Cover> {
        let _span = PerfSpan::new("decompose");

        let mut items = Vec::new();
        while let Some(item) = self.next_item() {
            let item = item?;
            tracing::trace!(target: targets::DECOMPOSE, index = items.len(), "rectangle {}", item);
            items.push(item);
        }

        tracing::debug!(
            target: targets::DECOMPOSE,
            rectangles = self.stats.rectangles,
            steps = self.stats.refinement_steps,
            fallbacks = self.stats.fallbacks(),
            redundant = self.stats.redundant_cells,
            "decomposition finished"
        );

        Ok(Cover::new(items, self.stats))
    }

    fn extract(&mut self) -> Result<CoverItem> {
        let refined = refine(&*self.matrix, self.options.max_refinement_steps);

        let (rows, cols) = match refined {
            Refined::Rectangle { rows, cols, steps } => {
                self.stats.refinement_steps += steps;
                if !has_uncovered(&*self.matrix, &rows, &cols) {
                    return self.fallback(FallbackReason::NoProgress, rows.len(), cols.len());
                }
                (rows, cols)
            }
            Refined::Degenerate { rows, cols, steps } => {
                self.stats.refinement_steps += steps;
                return self.fallback(FallbackReason::Degenerate, rows, cols);
            }
            Refined::StepLimit { steps } => {
                self.stats.refinement_steps += steps;
                let dims = self.matrix.dimensions();
                return self.fallback(FallbackReason::StepLimit, dims.rows, dims.cols);
            }
        };

        self.cover(rows, cols)
    }

    /// Emit the first uncovered cell, row-major, as a 1x1 rectangle.
    fn fallback(&mut self, reason: FallbackReason, rows: usize, cols: usize) -> Result<CoverItem> {
        let Some((row, col)) = self.matrix.first_uncovered() else {
            return Err(Error::DegenerateRectangle { rows, cols });
        };

        tracing::debug!(
            target: targets::DECOMPOSE,
            ?reason,
            rows,
            cols,
            "falling back to single cell ({}, {})",
            row,
            col
        );
        self.stats.record_fallback(reason);

        self.cover(vec![row.index()], vec![col.index()])
    }

    fn cover(&mut self, rows: Vec<usize>, cols: Vec<usize>) -> Result<CoverItem> {
        for &r in &rows {
            for &c in &cols {
                if self.matrix.cover(r, c)? {
                    self.stats.covered_cells += 1;
                } else {
                    self.stats.redundant_cells += 1;
                }
            }
        }
        self.stats.rectangles += 1;
        Ok(CoverItem::from_indices(rows, cols))
    }
}

/// Decompose a matrix into an ordered rectangle cover.
///
/// A matrix with a zero dimension or without `Applies` cells yields an
/// empty cover.
pub fn decompose(matrix: &mut IncidenceMatrix, options: DecomposeOptions) -> Result<Cover> {
    if matrix.dimensions().is_empty() {
        tracing::debug!(target: targets::DECOMPOSE, "empty matrix, nothing to decompose");
        return Ok(Cover::default());
    }
    Decomposer::with_options(matrix, options).run()
}

/// Check that `cover` claims every applicable cell of `matrix`.
///
/// Returns the first cell left out, if any.
pub fn find_uncovered(
    matrix: &IncidenceMatrix,
    cover: &Cover,
) -> Option<(DeclarationId, ElementId)> {
    matrix
        .applicable_cells()
        .find(|&(d, e)| !cover.covers(d, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(cover: &Cover) -> Vec<(Vec<usize>, Vec<usize>)> {
        cover
            .iter()
            .map(|i| {
                (
                    i.declarations().iter().map(|d| d.index()).collect(),
                    i.elements().iter().map(|e| e.index()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn overlapping_declarations_scenario() {
        // color: red on e0, e1; font-weight: bold on e0, e1, e2.
        let mut m = IncidenceMatrix::from_rows(&[[true, true, false], [true, true, true]]);
        let cover = decompose(&mut m, DecomposeOptions::default()).unwrap();

        assert_eq!(
            items(&cover),
            vec![(vec![0, 1], vec![0, 1]), (vec![1], vec![2])]
        );
        assert_eq!(cover.stats().covered_cells, 5);
        assert_eq!(cover.stats().fallbacks(), 0);
        assert!(!m.has_uncovered());
    }

    #[test]
    fn single_cell_matrix() {
        let mut m = IncidenceMatrix::from_rows(&[
            [false, false, false],
            [false, true, false],
            [false, false, false],
        ]);
        let cover = decompose(&mut m, DecomposeOptions::default()).unwrap();
        assert_eq!(items(&cover), vec![(vec![1], vec![1])]);
    }

    #[test]
    fn dense_matrix_is_one_rectangle() {
        let mut m = IncidenceMatrix::from_rows(&[[true; 4]; 3]);
        let cover = decompose(&mut m, DecomposeOptions::default()).unwrap();
        assert_eq!(items(&cover), vec![(vec![0, 1, 2], vec![0, 1, 2, 3])]);
        assert_eq!(cover.stats().refinement_steps, 0);
    }

    #[test]
    fn all_empty_matrix_yields_empty_cover() {
        let mut m = IncidenceMatrix::from_rows(&[[false, false]]);
        let cover = decompose(&mut m, DecomposeOptions::default()).unwrap();
        assert!(cover.is_empty());
    }

    #[test]
    fn zero_dimension_short_circuits() {
        let mut m = IncidenceMatrix::new(crate::matrix::Dimensions::new(3, 0));
        assert!(decompose(&mut m, DecomposeOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn step_limit_forces_single_cells() {
        let mut m = IncidenceMatrix::from_rows(&[[true, false], [true, true]]);
        let cover = decompose(&mut m, DecomposeOptions::with_step_limit(0)).unwrap();

        assert_eq!(
            items(&cover),
            vec![(vec![0], vec![0]), (vec![1], vec![0]), (vec![1], vec![1])]
        );
        assert_eq!(cover.stats().step_limit_fallbacks, 3);
        assert_eq!(find_uncovered(&m, &cover), None);
    }

    #[test]
    fn step_wise_access_to_matrix() {
        let mut m = IncidenceMatrix::from_rows(&[[true, true, false], [true, true, true]]);
        let mut decomposer = Decomposer::new(&mut m);

        assert_eq!(decomposer.matrix().count(Cell::Applies), 5);
        let first = decomposer.next_item().unwrap().unwrap();
        assert_eq!(first.area(), 4);
        assert_eq!(decomposer.matrix().count(Cell::Applies), 1);

        let second = decomposer.next_item().unwrap().unwrap();
        assert_eq!(second.area(), 1);
        assert!(decomposer.next_item().is_none());
        assert_eq!(decomposer.stats().rectangles, 2);
    }

    #[test]
    fn later_rectangles_may_reuse_covered_cells() {
        let mut m = IncidenceMatrix::from_rows(&[[true, true, true], [true, false, false]]);
        let cover = decompose(&mut m, DecomposeOptions::default()).unwrap();

        let rendered: Vec<String> = cover.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["[d0] x [e0, e1, e2]", "[d0, d1] x [e0]"]);
        assert_eq!(cover.stats().covered_cells, 4);
        assert_eq!(cover.stats().redundant_cells, 1);
        assert_eq!(cover.stats().fallbacks(), 0);
        assert!(!m.has_uncovered());
    }

    #[test]
    fn degenerate_fallback_takes_first_uncovered_cell() {
        let mut m = IncidenceMatrix::from_rows(&[[false, false], [false, true]]);
        let mut decomposer = Decomposer::new(&mut m);

        let item = decomposer.fallback(FallbackReason::Degenerate, 2, 0).unwrap();
        assert_eq!(item.to_string(), "[d1] x [e1]");
        assert_eq!(decomposer.stats().degenerate_fallbacks, 1);
        assert!(decomposer.next_item().is_none());
    }

    #[test]
    fn degenerate_without_uncovered_cell_is_an_error() {
        let mut m = IncidenceMatrix::from_rows(&[[false, true]]);
        let mut decomposer = Decomposer::new(&mut m);
        decomposer.next_item().unwrap().unwrap();

        let err = decomposer.fallback(FallbackReason::Degenerate, 1, 0).unwrap_err();
        assert!(matches!(err, Error::DegenerateRectangle { rows: 1, cols: 0 }));
        assert_eq!(decomposer.stats().degenerate_fallbacks, 0);
    }

    #[test]
    fn find_uncovered_reports_gaps() {
        let m = IncidenceMatrix::from_rows(&[[true, true]]);
        let partial = Cover::new(
            vec![CoverItem::from_indices(vec![0], vec![0])],
            DecompositionStats::default(),
        );
        assert_eq!(
            find_uncovered(&m, &partial),
            Some((DeclarationId::new(0), ElementId::new(1)))
        );
    }
}
