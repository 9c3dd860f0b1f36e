//! Markup collaborator for classfold.
//!
//! [`Document`] keeps a document as its event stream and exposes every
//! element's class list through the [`ClassTarget`] seam, so the cover
//! engine can rewrite class memberships without touching anything else in
//! the markup.
//!
//! # Example
//!
//! ```
//! use classfold_core::target::{ClassNamespace, ClassTarget};
//! use classfold_markup::Document;
//!
//! let mut doc = Document::parse(r#"<p class="x-red intro">Hi</p>"#)?;
//! let relevant = doc.elements_in(&ClassNamespace::default());
//! doc.remove_classes_where(relevant[0], &|c| c.starts_with("x-"));
//! doc.add_class(relevant[0], "q0");
//!
//! assert_eq!(doc.to_markup()?, r#"<p class="intro q0">Hi</p>"#);
//! # Ok::<(), classfold_markup::Error>(())
//! ```
//!
//! [`ClassTarget`]: classfold_core::target::ClassTarget

pub mod class_list;
pub mod document;

mod error;

pub use class_list::ClassList;
pub use document::{Document, ElementHandle};
pub use error::{Error, Result};
