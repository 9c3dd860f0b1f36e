//! Stylesheet collection.

use std::path::{Path, PathBuf};

use crate::rules::{StyleItem, StyleRule};
use crate::{Error, Result};

/// A parsed stylesheet: rules and at-rules in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    /// The items of this stylesheet.
    pub items: Vec<StyleItem>,
    /// Source file path, when loaded from disk.
    pub source_path: Option<PathBuf>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a stylesheet from a CSS file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut sheet = Self::from_css(&content)?;
        sheet.source_path = Some(path.to_path_buf());
        Ok(sheet)
    }

    /// Parse a stylesheet from CSS text.
    pub fn from_css(css: &str) -> Result<Self> {
        let items = crate::parser::parse_css(css)?;
        Ok(Self {
            items,
            source_path: None,
        })
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items.
    pub fn iter(&self) -> impl Iterator<Item = &StyleItem> {
        self.items.iter()
    }

    /// Iterate over qualified rules only.
    pub fn rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.items.iter().filter_map(StyleItem::as_rule)
    }
}
