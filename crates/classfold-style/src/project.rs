//! Projection of a stylesheet onto the merge input.
//!
//! Selectors that are single classes inside the controlled namespace feed the
//! [`DeclarationSet`]; everything else becomes passthrough content.

use classfold_core::declaration::DeclarationSet;
use classfold_core::target::ClassNamespace;

use crate::rules::{StyleItem, StyleSheet};
use crate::selector::Selector;
use crate::Result;

/// What to do with a non-class selector that mentions a namespaced class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SelectorPolicy {
    /// Keep it as a passthrough rule.
    #[default]
    Passthrough,
    /// Fail with an unsupported-selector error.
    Reject,
}

/// Result of [`project`].
#[derive(Debug, Clone, Default)]
pub struct Projection {
    /// Declarations of namespaced class rules, in rule then declaration order.
    pub declarations: DeclarationSet,
    /// Items copied to the output as they are, in source order.
    pub passthrough: Vec<StyleItem>,
}

/// Split `sheet` into merge input and passthrough content.
pub fn project(
    sheet: &StyleSheet,
    namespace: &ClassNamespace,
    policy: SelectorPolicy,
) -> Result<Projection> {
    let mut projection = Projection::default();

    for item in sheet.iter() {
        let rule = match item {
            StyleItem::Rule(rule) => rule,
            StyleItem::Verbatim(_) => {
                projection.passthrough.push(item.clone());
                continue;
            }
        };

        let (merged, kept): (Vec<&Selector>, Vec<&Selector>) = rule
            .selectors
            .iter()
            .partition(|s| s.is_namespaced_class(namespace));

        if policy == SelectorPolicy::Reject
            && let Some(selector) = kept.iter().find(|s| s.mentions_namespace(namespace))
        {
            return Err(classfold_core::Error::unsupported_selector(
                selector.to_string(),
                format!("Selector mixes {namespace} classes with other constructs"),
            )
            .into());
        }

        for declaration in &rule.declarations {
            for selector in &merged {
                if let Selector::Class(class) = selector {
                    projection.declarations.insert(declaration, class.clone());
                }
            }
        }

        if !kept.is_empty() {
            let selectors = kept.into_iter().cloned().collect();
            projection
                .passthrough
                .push(StyleItem::Rule(rule.with_selectors(selectors)));
        }
    }

    tracing::debug!(
        target: "classfold_style::project",
        declarations = projection.declarations.len(),
        passthrough = projection.passthrough.len(),
        namespace = %namespace,
        "projected stylesheet"
    );
    Ok(projection)
}
