//! Replays a cover onto a document.
//!
//! Applying a cover strips the controlled-namespace classes from every
//! relevant element, creates one rule per cover item (numbered in discovery
//! order) and adds the rule's class to the item's elements.

mod rule;

pub use rule::GeneratedRule;

use crate::decompose::CoverItem;
use crate::logging::{PerfSpan, targets};
use crate::matrix::IndexTables;
use crate::target::{ClassNamespace, ClassTarget};

/// Default prefix of generated rule names.
pub const DEFAULT_RULE_PREFIX: &str = "q";

/// Rewrites element class memberships from a cover.
#[derive(Debug, Clone)]
pub struct CoverApplier<'a> {
    namespace: &'a ClassNamespace,
    rule_prefix: &'a str,
}

impl<'a> CoverApplier<'a> {
    /// Create an applier using the default `q` rule prefix.
    pub fn new(namespace: &'a ClassNamespace) -> Self {
        Self {
            namespace,
            rule_prefix: DEFAULT_RULE_PREFIX,
        }
    }

    /// Use a different prefix for generated rule names.
    pub fn with_rule_prefix(mut self, prefix: &'a str) -> Self {
        self.rule_prefix = prefix;
        self
    }

    /// Name of the rule generated for the item at `index`.
    pub fn rule_name(&self, index: usize) -> String {
        format!("{}{}", self.rule_prefix, index)
    }

    /// Remove every controlled-namespace class from `elements`.
    ///
    /// [`apply`](Self::apply) does this for the relevant elements of its
    /// tables; call it directly when there is no cover to apply.
    pub fn strip<T: ClassTarget>(
        &self,
        elements: impl IntoIterator<Item = T::Handle>,
        target: &mut T,
    ) {
        let namespace = self.namespace;
        for element in elements {
            target.remove_classes_where(element, &|class| namespace.contains(class));
        }
    }

    /// Apply `items` to `target`, returning the generated rules in order.
    pub fn apply<T: ClassTarget>(
        &self,
        items: &[CoverItem],
        tables: &IndexTables<T::Handle>,
        target: &mut T,
    ) -> Vec<GeneratedRule> {
        let _span = PerfSpan::new("apply_cover");

        self.strip(tables.elements.iter().map(|(_, element)| element), target);

        let mut rules = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let name = self.rule_name(index);
            let declarations = item
                .declarations()
                .iter()
                .map(|&d| tables.declarations[d].clone())
                .collect();

            for &element in item.elements() {
                target.add_class(tables.elements[element], &name);
            }

            tracing::trace!(
                target: targets::APPLY,
                rule = %name,
                elements = item.elements().len(),
                "generated rule"
            );
            rules.push(GeneratedRule { name, declarations });
        }

        tracing::debug!(
            target: targets::APPLY,
            rules = rules.len(),
            elements = tables.elements.len(),
            "applied cover"
        );
        rules
    }
}
