//! Generated merged rules.

use std::fmt;

use crate::declaration::CanonicalKey;

/// A merged rule synthesized from one cover item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRule {
    /// Class name of the rule (e.g. `q0`).
    pub name: String,
    /// Canonical declarations, ascending by declaration index.
    pub declarations: Vec<CanonicalKey>,
}

impl GeneratedRule {
    /// The declaration body, `;`-joined.
    pub fn body(&self) -> String {
        let parts: Vec<&str> = self.declarations.iter().map(CanonicalKey::as_str).collect();
        parts.join(";")
    }
}

impl fmt::Display for GeneratedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}{{{}}}", self.name, self.body())
    }
}
