//! Merge style declarations shared across elements into generated classes.
//!
//! `classfold` reads a document and its stylesheet, finds the declarations
//! that the controlled-namespace classes (by default `x-*`) apply to
//! overlapping sets of elements, and rewrites both files so that each group
//! is expressed by one generated class (`q0`, `q1`, ...).
//!
//! The work is split across crates re-exported here:
//!
//! - [`engine`]: incidence matrix, rectangle cover and cover application
//! - [`style`]: stylesheet parsing, projection and emission
//! - [`markup`]: event-level document with editable class lists
//!
//! # Example
//!
//! ```
//! use classfold::{Config, Optimizer};
//!
//! let html = r#"<p class="x-red x-bold">a</p><p class="x-red x-bold">b</p><p class="x-bold">c</p>"#;
//! let css = ".x-red { color: red }\n.x-bold { font-weight: bold }";
//!
//! let output = Optimizer::new(Config::default())?.run(html, css)?;
//!
//! assert_eq!(
//!     output.markup,
//!     r#"<p class="q0">a</p><p class="q0">b</p><p class="q1">c</p>"#
//! );
//! assert_eq!(output.css, ".q0{color: red;font-weight: bold}\n.q1{font-weight: bold}\n");
//! # Ok::<(), classfold::Error>(())
//! ```

pub mod config;
pub mod pipeline;

mod error;

pub use classfold_core as engine;
pub use classfold_markup as markup;
pub use classfold_style as style;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{Optimizer, Output, Report};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::pipeline::{Optimizer, Output, Report};
    pub use classfold_core::prelude::*;
    pub use classfold_markup::{ClassList, Document, ElementHandle};
    pub use classfold_style::prelude::*;
}
