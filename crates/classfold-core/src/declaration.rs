//! Declarations, class selectors and the declaration set fed to the builder.

use std::collections::HashMap;
use std::fmt;

use crate::{Error, Result};

/// A flat `property: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Property name, ASCII-lowercased.
    pub property: String,
    /// Value text as written, trimmed.
    pub value: String,
}

impl Declaration {
    /// Create a declaration, normalizing the property name and trimming the value.
    pub fn new(property: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Self {
            property: property.as_ref().trim().to_ascii_lowercase(),
            value: value.as_ref().trim().to_string(),
        }
    }

    /// The canonical `"<property>: <value>"` key.
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey(format!("{}: {}", self.property, self.value))
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)
    }
}

/// Normalized `property: value` string identifying a declaration regardless
/// of which selectors produced it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Declaration> for CanonicalKey {
    fn from(declaration: &Declaration) -> Self {
        declaration.canonical_key()
    }
}

/// Characters that make a selector more than a single class token.
const COMPLEX_SELECTOR_CHARS: &[char] = &[
    '.', '#', ':', '[', ']', '>', '+', '~', ',', '*', '(', ')', '\\',
];

/// A selector restricted to a single class token (`.name`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassSelector {
    class_name: String,
}

impl ClassSelector {
    /// Create a selector for an already-decoded class name.
    pub fn new(class_name: impl Into<String>) -> Result<Self> {
        let class_name = class_name.into();
        if class_name.is_empty() {
            return Err(Error::unsupported_selector(".", "Empty class name"));
        }
        if class_name.chars().any(char::is_whitespace) {
            return Err(Error::unsupported_selector(
                format!(".{class_name}"),
                "Class name contains whitespace",
            ));
        }
        Ok(Self { class_name })
    }

    /// Parse a selector string of the exact form `.name`.
    ///
    /// Anything else (type, id, compound, combinator or pseudo-class
    /// selectors) is rejected. CSS escapes are not decoded here.
    pub fn parse(selector: &str) -> Result<Self> {
        let trimmed = selector.trim();
        let Some(name) = trimmed.strip_prefix('.') else {
            return Err(Error::unsupported_selector(
                selector,
                "Only single class selectors are supported",
            ));
        };
        if name.contains(COMPLEX_SELECTOR_CHARS) {
            return Err(Error::unsupported_selector(
                selector,
                "Compound or complex selectors are not supported",
            ));
        }
        Self::new(name)
    }

    /// The class name without the leading dot.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl fmt::Display for ClassSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.class_name)
    }
}

/// One row of the incidence matrix before it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationEntry {
    /// Canonical key of the declaration.
    pub key: CanonicalKey,
    /// Selectors that declared it, deduplicated, in first-seen order.
    pub selectors: Vec<ClassSelector>,
}

/// Ordered map from canonical key to the selectors that declared it.
///
/// Entries keep first-insertion order; that order becomes the row order of
/// the incidence matrix and therefore the generated rule numbering.
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    entries: Vec<DeclarationEntry>,
    index: HashMap<CanonicalKey, usize>,
}

impl DeclarationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `selector` declares the declaration identified by `key`.
    ///
    /// Accepts a `&Declaration` or an already canonical key.
    pub fn insert(&mut self, key: impl Into<CanonicalKey>, selector: ClassSelector) {
        let entry = self.entry(key.into());
        if !entry.selectors.contains(&selector) {
            entry.selectors.push(selector);
        }
    }

    fn entry(&mut self, key: CanonicalKey) -> &mut DeclarationEntry {
        let next = self.entries.len();
        let slot = *self.index.entry(key.clone()).or_insert(next);
        if slot == next {
            self.entries.push(DeclarationEntry {
                key,
                selectors: Vec::new(),
            });
        }
        &mut self.entries[slot]
    }

    /// Look up the selectors for a key.
    pub fn get(&self, key: &CanonicalKey) -> Option<&DeclarationEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Number of distinct declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in row order.
    pub fn iter(&self) -> impl Iterator<Item = &DeclarationEntry> {
        self.entries.iter()
    }
}
