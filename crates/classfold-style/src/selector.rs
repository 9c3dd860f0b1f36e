//! Selector classification.
//!
//! Only single class selectors take part in merging. Everything else is kept
//! as its source text and copied to the output untouched.

use std::fmt;

use classfold_core::declaration::ClassSelector;
use classfold_core::target::ClassNamespace;

/// One comma-separated selector of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// A selector of the exact form `.name`.
    Class(ClassSelector),
    /// Any other selector, as written.
    Other(String),
}

impl Selector {
    /// Classify a selector from its source text.
    pub fn parse(text: &str) -> Self {
        match ClassSelector::parse(text) {
            Ok(class) => Self::Class(class),
            Err(_) => Self::Other(text.trim().to_string()),
        }
    }

    /// The class selector, if this is one.
    pub fn as_class(&self) -> Option<&ClassSelector> {
        match self {
            Self::Class(class) => Some(class),
            Self::Other(_) => None,
        }
    }

    /// Returns true if this is a single class selector inside `namespace`.
    pub fn is_namespaced_class(&self, namespace: &ClassNamespace) -> bool {
        self.as_class()
            .is_some_and(|class| namespace.contains(class.class_name()))
    }

    /// Returns true if a compound or complex selector mentions a class
    /// inside `namespace` (e.g. `.x-a:hover` or `div .x-a`).
    pub fn mentions_namespace(&self, namespace: &ClassNamespace) -> bool {
        match self {
            Self::Class(_) => false,
            Self::Other(text) => text
                .match_indices('.')
                .any(|(i, _)| namespace.contains(&text[i + 1..])),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => fmt::Display::fmt(class, f),
            Self::Other(text) => f.write_str(text),
        }
    }
}
