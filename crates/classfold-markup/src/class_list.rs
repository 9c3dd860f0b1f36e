//! Ordered class sets.

use std::fmt;

/// The classes of one element: ordered, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `class` attribute value. Repeated tokens keep their first position.
    pub fn parse(value: &str) -> Self {
        let mut list = Self::new();
        for token in value.split_ascii_whitespace() {
            list.insert(token);
        }
        list
    }

    /// Returns true if `class` is in the list.
    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Append `class` unless present. Returns true if the list changed.
    pub fn insert(&mut self, class: &str) -> bool {
        if self.contains(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove every class matching `predicate`. Returns true if the list changed.
    pub fn remove_where(&mut self, predicate: impl Fn(&str) -> bool) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| !predicate(c));
        self.classes.len() != before
    }

    /// Iterate over the classes in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.classes.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dedups_and_keeps_order() {
        let list = ClassList::parse("  b a\tb\nc ");
        assert_eq!(list.iter().collect::<Vec<_>>(), ["b", "a", "c"]);
        assert_eq!(list.to_string(), "b a c");
    }

    #[test]
    fn insert_and_remove_report_changes() {
        let mut list = ClassList::parse("x-a title");
        assert!(!list.insert("title"));
        assert!(list.insert("q0"));
        assert!(list.remove_where(|c| c.starts_with("x-")));
        assert!(!list.remove_where(|c| c.starts_with("x-")));
        assert_eq!(list.to_string(), "title q0");
    }

    #[test]
    fn empty_value() {
        assert!(ClassList::parse("   ").is_empty());
    }
}
