//! Single stylesheet items.

use std::fmt;

use classfold_core::declaration::Declaration;

use crate::selector::Selector;

/// A qualified rule: selectors mapped to flat declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// The comma-separated selectors, in source order.
    pub selectors: Vec<Selector>,
    /// Declarations in source order. Duplicates are kept.
    pub declarations: Vec<Declaration>,
    /// Source order among the rules of the stylesheet.
    pub order: u32,
}

impl StyleRule {
    /// Create a new style rule.
    pub fn new(selectors: Vec<Selector>, declarations: Vec<Declaration>, order: u32) -> Self {
        Self {
            selectors,
            declarations,
            order,
        }
    }

    /// Same declarations under a different selector list.
    pub fn with_selectors(&self, selectors: Vec<Selector>) -> Self {
        Self {
            selectors,
            declarations: self.declarations.clone(),
            order: self.order,
        }
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        f.write_str("{")?;
        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{declaration}")?;
        }
        f.write_str("}")
    }
}

/// A top-level stylesheet item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleItem {
    /// A qualified rule.
    Rule(StyleRule),
    /// An at-rule, kept as its source text.
    Verbatim(String),
}

impl StyleItem {
    /// The rule, if this item is one.
    pub fn as_rule(&self) -> Option<&StyleRule> {
        match self {
            Self::Rule(rule) => Some(rule),
            Self::Verbatim(_) => None,
        }
    }
}

impl fmt::Display for StyleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => fmt::Display::fmt(rule, f),
            Self::Verbatim(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_display() {
        let rule = StyleRule::new(
            vec![Selector::parse(".a"), Selector::parse("div p")],
            vec![
                Declaration::new("color", "red"),
                Declaration::new("margin", "0 auto"),
            ],
            0,
        );
        assert_eq!(rule.to_string(), ".a, div p{color: red;margin: 0 auto}");
    }

    #[test]
    fn with_selectors_keeps_body() {
        let rule = StyleRule::new(
            vec![Selector::parse(".x-a"), Selector::parse("h1")],
            vec![Declaration::new("color", "red")],
            4,
        );
        let narrowed = rule.with_selectors(vec![Selector::parse("h1")]);
        assert_eq!(narrowed.to_string(), "h1{color: red}");
        assert_eq!(narrowed.order, 4);
    }
}
