//! Stylesheet serialization.

use std::fmt::Write as _;

use classfold_core::apply::GeneratedRule;

use crate::rules::StyleItem;

/// Write passthrough items, then the generated rules, one per line.
pub fn emit(passthrough: &[StyleItem], generated: &[GeneratedRule]) -> String {
    let mut css = String::new();
    for item in passthrough {
        let _ = writeln!(css, "{item}");
    }
    for rule in generated {
        let _ = writeln!(css, "{rule}");
    }
    css
}
