//! Error types for the cover engine.

use crate::ids::{DeclarationId, ElementId};

/// Result type alias for cover operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, decomposing or applying a cover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Nothing to decompose: no declarations or no relevant elements.
    #[error("Empty input: {declarations} declaration(s), {elements} relevant element(s)")]
    EmptyInput { declarations: usize, elements: usize },

    /// A rectangle with an empty row or column set was produced and no
    /// uncovered cell was left to fall back on.
    #[error("Degenerate rectangle: {rows} row(s) x {cols} column(s)")]
    DegenerateRectangle { rows: usize, cols: usize },

    /// Decomposition ran past its iteration bound.
    #[error("Decomposition did not converge after {iterations} iteration(s)")]
    NonConvergence { iterations: usize },

    /// A selector outside the single-class form reached the core.
    #[error("Unsupported selector '{selector}': {message}")]
    UnsupportedSelector { selector: String, message: String },

    /// An `Empty` cell was asked to become `Covered`.
    #[error("Illegal cell transition at ({row}, {col}): cell is empty")]
    IllegalTransition { row: DeclarationId, col: ElementId },
}

impl Error {
    /// Create an empty-input error.
    pub fn empty_input(declarations: usize, elements: usize) -> Self {
        Self::EmptyInput {
            declarations,
            elements,
        }
    }

    /// Create an unsupported-selector error.
    pub fn unsupported_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnsupportedSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors that only signal there was nothing to do.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}
