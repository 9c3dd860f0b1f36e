//! The seam between the cover engine and a document.

use std::fmt;

/// Prefix-based controlled class namespace.
///
/// Elements carrying at least one class in the namespace are relevant, and
/// those classes are stripped when a cover is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassNamespace {
    prefix: String,
}

impl ClassNamespace {
    /// Create a namespace from its class prefix (e.g. `"x-"`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `class` belongs to the namespace.
    pub fn contains(&self, class: &str) -> bool {
        class.starts_with(&self.prefix)
    }

    /// Returns true if any of `classes` belongs to the namespace.
    pub fn any<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> bool {
        classes.into_iter().any(|c| self.contains(c))
    }
}

impl Default for ClassNamespace {
    fn default() -> Self {
        Self::new("x-")
    }
}

impl fmt::Display for ClassNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*", self.prefix)
    }
}

/// Class membership access to the elements of a document.
///
/// The builder only reads membership; the applier adds and removes classes.
pub trait ClassTarget {
    /// Stable handle to an element.
    type Handle: Copy + fmt::Debug;

    /// Returns true if the element's class set contains `class`.
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    /// Add `class` to the element, keeping existing order. No-op if present.
    fn add_class(&mut self, element: Self::Handle, class: &str);

    /// Remove every class of the element for which `predicate` returns true.
    fn remove_classes_where(&mut self, element: Self::Handle, predicate: &dyn Fn(&str) -> bool);
}

/// A document-free class store: one ordered class list per element.
///
/// Handles are positions in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassTable {
    elements: Vec<Vec<String>>,
}

impl ClassTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its handle.
    pub fn push<I, S>(&mut self, classes: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for class in classes {
            let class = class.into();
            if !list.contains(&class) {
                list.push(class);
            }
        }
        self.elements.push(list);
        self.elements.len() - 1
    }

    /// Class list of an element.
    pub fn classes(&self, element: usize) -> &[String] {
        &self.elements[element]
    }

    /// Handles of elements with a class in `namespace`, in insertion order.
    pub fn relevant(&self, namespace: &ClassNamespace) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, classes)| namespace.any(classes.iter().map(String::as_str)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the table has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ClassTarget for ClassTable {
    type Handle = usize;

    fn has_class(&self, element: usize, class: &str) -> bool {
        self.elements[element].iter().any(|c| c == class)
    }

    fn add_class(&mut self, element: usize, class: &str) {
        let list = &mut self.elements[element];
        if !list.iter().any(|c| c == class) {
            list.push(class.to_string());
        }
    }

    fn remove_classes_where(&mut self, element: usize, predicate: &dyn Fn(&str) -> bool) {
        self.elements[element].retain(|c| !predicate(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_table_behaves_like_a_set() {
        let mut table = ClassTable::new();
        let a = table.push(["x-a", "plain", "x-a"]);
        assert_eq!(table.classes(a), ["x-a", "plain"]);

        table.add_class(a, "plain");
        table.add_class(a, "q0");
        assert_eq!(table.classes(a), ["x-a", "plain", "q0"]);

        let ns = ClassNamespace::default();
        table.remove_classes_where(a, &|c| ns.contains(c));
        assert_eq!(table.classes(a), ["plain", "q0"]);
    }

    #[test]
    fn class_table_relevant_elements() {
        let mut table = ClassTable::new();
        table.push(["x-a"]);
        table.push(["plain"]);
        table.push(["plain", "x-b"]);
        assert_eq!(table.relevant(&ClassNamespace::default()), vec![0, 2]);
    }

    #[test]
    fn namespace_membership() {
        let ns = ClassNamespace::default();
        assert!(ns.contains("x-title"));
        assert!(!ns.contains("title"));
        assert!(ns.any(["a", "x-b"]));
        assert!(!ns.any(["a", "b"]));
        assert_eq!(ns.to_string(), "x-*");
    }
}
