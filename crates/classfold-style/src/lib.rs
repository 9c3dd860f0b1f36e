//! Stylesheet collaborator for classfold.
//!
//! This crate reads the stylesheet side of a merge and writes the result:
//!
//! - **CSS Parsing**: selector lists and flat declarations via `cssparser`,
//!   with at-rules kept as source text
//! - **Projection**: namespaced class rules become merge input, everything
//!   else is passed through
//! - **Emission**: passthrough content followed by the generated rules
//!
//! # Example
//!
//! ```
//! use classfold_core::target::ClassNamespace;
//! use classfold_style::prelude::*;
//!
//! let sheet = StyleSheet::from_css("h1 { margin: 0 } .x-red { color: red }")?;
//! let projection = project(&sheet, &ClassNamespace::default(), SelectorPolicy::default())?;
//!
//! assert_eq!(projection.declarations.len(), 1);
//! assert_eq!(emit(&projection.passthrough, &[]), "h1{margin: 0}\n");
//! # Ok::<(), classfold_style::Error>(())
//! ```

pub mod emit;
pub mod parser;
pub mod project;
pub mod rules;
pub mod selector;

mod error;

pub use emit::emit;
pub use error::{Error, Result};
pub use project::{Projection, SelectorPolicy, project};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::emit::emit;
    pub use crate::project::{Projection, SelectorPolicy, project};
    pub use crate::rules::{StyleItem, StyleRule, StyleSheet};
    pub use crate::selector::Selector;
}
