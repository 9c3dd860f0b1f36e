//! Rectangle cover engine for class merging.
//!
//! This crate turns "declaration applies to element" data into a small set
//! of merged rules:
//!
//! - **Matrix Builder**: declarations x relevant elements incidence matrix
//!   plus index tables ([`matrix`])
//! - **Decomposer**: greedy rectangle cover of the matrix ([`decompose`])
//! - **Cover Applier**: merged rules and rewritten class memberships
//!   ([`apply`])
//!
//! Documents are reached only through the [`ClassTarget`](target::ClassTarget)
//! trait; parsing and serialization live in the collaborator crates.
//!
//! # Example
//!
//! ```
//! use classfold_core::prelude::*;
//!
//! let mut set = DeclarationSet::new();
//! let x_red = ClassSelector::new("x-red")?;
//! let x_bold = ClassSelector::new("x-bold")?;
//! set.insert(&Declaration::new("color", "red"), x_red);
//! set.insert(&Declaration::new("font-weight", "bold"), x_bold);
//!
//! let mut elements = ClassTable::new();
//! elements.push(["x-red", "x-bold"]);
//! elements.push(["x-red", "x-bold"]);
//! elements.push(["x-bold"]);
//!
//! let namespace = ClassNamespace::new("x-");
//! let relevant = elements.relevant(&namespace);
//! let mut built = MatrixBuilder::new(&set).build(&elements, &relevant)?;
//! let cover = decompose(&mut built.matrix, DecomposeOptions::default())?;
//! let rules = CoverApplier::new(&namespace).apply(cover.items(), &built.tables, &mut elements);
//!
//! assert_eq!(rules[0].to_string(), ".q0{color: red;font-weight: bold}");
//! assert_eq!(rules[1].to_string(), ".q1{font-weight: bold}");
//! # Ok::<(), classfold_core::Error>(())
//! ```

pub mod apply;
pub mod declaration;
pub mod decompose;
pub mod ids;
pub mod logging;
pub mod matrix;
pub mod target;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::apply::{CoverApplier, GeneratedRule};
    pub use crate::declaration::{CanonicalKey, ClassSelector, Declaration, DeclarationSet};
    pub use crate::decompose::{
        Cover, CoverItem, DecomposeOptions, Decomposer, DecompositionStats, decompose,
    };
    pub use crate::ids::{DeclarationId, ElementId};
    pub use crate::matrix::{BuiltMatrix, Cell, IncidenceMatrix, IndexTables, MatrixBuilder};
    pub use crate::target::{ClassNamespace, ClassTable, ClassTarget};
}
