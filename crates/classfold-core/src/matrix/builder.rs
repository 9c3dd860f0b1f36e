//! Builds the incidence matrix and its index tables.

use std::ops::Index;

use super::{Dimensions, IncidenceMatrix};
use crate::declaration::{CanonicalKey, DeclarationSet};
use crate::ids::{DeclarationId, ElementId};
use crate::logging::{PerfSpan, targets};
use crate::target::ClassTarget;
use crate::{Error, Result};

/// Row index -> canonical declaration key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationTable {
    keys: Vec<CanonicalKey>,
}

impl DeclarationTable {
    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate `(id, key)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclarationId, &CanonicalKey)> {
        self.keys
            .iter()
            .enumerate()
            .map(|(i, k)| (DeclarationId::new(i), k))
    }
}

impl Index<DeclarationId> for DeclarationTable {
    type Output = CanonicalKey;

    fn index(&self, id: DeclarationId) -> &CanonicalKey {
        &self.keys[id.index()]
    }
}

/// Column index -> element handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTable<H> {
    handles: Vec<H>,
}

impl<H: Copy> ElementTable<H> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterate `(id, handle)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, H)> + '_ {
        self.handles
            .iter()
            .enumerate()
            .map(|(i, &h)| (ElementId::new(i), h))
    }
}

impl<H> Index<ElementId> for ElementTable<H> {
    type Output = H;

    fn index(&self, id: ElementId) -> &H {
        &self.handles[id.index()]
    }
}

/// The index tables built alongside the matrix. Never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTables<H> {
    /// Declarations by row.
    pub declarations: DeclarationTable,
    /// Elements by column.
    pub elements: ElementTable<H>,
}

/// Output of [`MatrixBuilder::build`].
#[derive(Debug, Clone)]
pub struct BuiltMatrix<H> {
    /// The populated matrix, ready to hand to the decomposer.
    pub matrix: IncidenceMatrix,
    /// Index tables for replaying the cover.
    pub tables: IndexTables<H>,
}

/// Turns a declaration set and a list of relevant elements into an
/// incidence matrix.
///
/// Rows follow the declaration set's insertion order; columns follow the
/// order of `elements`, which callers pass in document pre-order.
pub struct MatrixBuilder<'a> {
    declarations: &'a DeclarationSet,
}

impl<'a> MatrixBuilder<'a> {
    /// Create a builder over a declaration set.
    pub fn new(declarations: &'a DeclarationSet) -> Self {
        Self { declarations }
    }

    /// Build the matrix.
    ///
    /// Fails with [`Error::EmptyInput`] when there are no declarations or no
    /// relevant elements.
    pub fn build<T: ClassTarget>(
        &self,
        target: &T,
        elements: &[T::Handle],
    ) -> Result<BuiltMatrix<T::Handle>> {
        let _span = PerfSpan::new("build_matrix");

        let dims = Dimensions::new(self.declarations.len(), elements.len());
        if dims.is_empty() {
            return Err(Error::empty_input(dims.rows, dims.cols));
        }

        let mut matrix = IncidenceMatrix::new(dims);
        for (row, entry) in self.declarations.iter().enumerate() {
            for selector in &entry.selectors {
                for (col, &element) in elements.iter().enumerate() {
                    if target.has_class(element, selector.class_name()) {
                        matrix.set_applies(DeclarationId::new(row), ElementId::new(col));
                    }
                }
            }
        }

        tracing::debug!(
            target: targets::BUILDER,
            rows = dims.rows,
            cols = dims.cols,
            applies = matrix.count(super::Cell::Applies),
            "built incidence matrix"
        );
        tracing::trace!(target: targets::BUILDER, "incidence matrix:\n{}", matrix);

        let tables = IndexTables {
            declarations: DeclarationTable {
                keys: self.declarations.iter().map(|e| e.key.clone()).collect(),
            },
            elements: ElementTable {
                handles: elements.to_vec(),
            },
        };

        Ok(BuiltMatrix { matrix, tables })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{ClassSelector, Declaration};
    use crate::matrix::Cell;
    use crate::target::{ClassNamespace, ClassTable};

    fn class(name: &str) -> ClassSelector {
        ClassSelector::new(name).unwrap()
    }

    fn scenario() -> (DeclarationSet, ClassTable) {
        let mut set = DeclarationSet::new();
        set.insert(&Declaration::new("color", "red"), class("x-a"));
        set.insert(&Declaration::new("font-weight", "bold"), class("x-a"));
        set.insert(&Declaration::new("font-weight", "bold"), class("x-b"));

        let mut table = ClassTable::new();
        table.push(["x-a"]);
        table.push(["plain"]);
        table.push(["x-a", "x-b"]);
        table.push(["x-b"]);
        (set, table)
    }

    #[test]
    fn builds_rows_and_columns() {
        let (set, table) = scenario();
        let relevant = table.relevant(&ClassNamespace::default());
        assert_eq!(relevant, vec![0, 2, 3]);

        let built = MatrixBuilder::new(&set).build(&table, &relevant).unwrap();
        assert_eq!(built.matrix.to_string(), "1 1 0\n1 1 1");

        assert_eq!(
            built.tables.declarations[DeclarationId::new(1)].as_str(),
            "font-weight: bold"
        );
        assert_eq!(built.tables.elements[ElementId::new(2)], 3);
    }

    #[test]
    fn selectors_outside_elements_leave_empty_rows() {
        let mut set = DeclarationSet::new();
        set.insert(&Declaration::new("color", "red"), class("x-missing"));
        let mut table = ClassTable::new();
        table.push(["x-a"]);

        let built = MatrixBuilder::new(&set).build(&table, &[0]).unwrap();
        assert_eq!(built.matrix.count(Cell::Applies), 0);
    }

    #[test]
    fn empty_input_is_reported() {
        let set = DeclarationSet::new();
        let table = ClassTable::new();
        let err = MatrixBuilder::new(&set).build(&table, &[]).unwrap_err();
        assert_eq!(err, Error::empty_input(0, 0));
        assert!(err.is_empty_input());

        let (set, table) = scenario();
        let err = MatrixBuilder::new(&set).build(&table, &[]).unwrap_err();
        assert_eq!(err, Error::empty_input(2, 0));
    }
}
