//! The declaration x element incidence matrix and its builder.

mod builder;
mod cell;
mod incidence;

pub use builder::{BuiltMatrix, DeclarationTable, ElementTable, IndexTables, MatrixBuilder};
pub use cell::Cell;
pub use incidence::{Dimensions, IncidenceMatrix};
