//! Stylesheet items and their collection.

mod rule;
mod stylesheet;

pub use rule::{StyleItem, StyleRule};
pub use stylesheet::StyleSheet;
