//! Pipeline configuration.
//!
//! Configuration is read from a TOML file; every field is optional:
//!
//! ```toml
//! namespace_prefix = "x-"
//! rule_prefix = "q"
//! max_refinement_steps = 64
//! selector_policy = "passthrough"   # or "reject"
//! keep_passthrough_rules = true
//! ```

use std::path::Path;

use classfold_core::decompose::DecomposeOptions;
use classfold_core::target::ClassNamespace;
use classfold_style::SelectorPolicy;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings for an [`Optimizer`](crate::Optimizer) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix of the controlled class namespace.
    pub namespace_prefix: String,
    /// Prefix of generated class names; the rule index is appended.
    pub rule_prefix: String,
    /// Refinement steps per rectangle before falling back to a single cell.
    pub max_refinement_steps: Option<usize>,
    /// Handling of complex selectors that mention namespaced classes.
    pub selector_policy: SelectorPolicy,
    /// Copy rules and at-rules that take no part in merging to the output.
    pub keep_passthrough_rules: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace_prefix: "x-".to_string(),
            rule_prefix: classfold_core::apply::DEFAULT_RULE_PREFIX.to_string(),
            max_refinement_steps: None,
            selector_policy: SelectorPolicy::Passthrough,
            keep_passthrough_rules: true,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(e.to_string()))
    }

    /// Read a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Check the prefixes.
    ///
    /// Both prefixes must be non-empty and free of whitespace, and the rule
    /// prefix must start a valid CSS class name.
    pub fn validate(&self) -> Result<()> {
        if self.namespace_prefix.is_empty() {
            return Err(Error::config("namespace_prefix must not be empty"));
        }
        if self.namespace_prefix.chars().any(char::is_whitespace) {
            return Err(Error::config(format!(
                "namespace_prefix '{}' contains whitespace",
                self.namespace_prefix
            )));
        }
        if !is_identifier_start(&self.rule_prefix) {
            return Err(Error::config(format!(
                "rule_prefix '{}' is not a valid class name start",
                self.rule_prefix
            )));
        }
        Ok(())
    }

    /// The controlled class namespace.
    pub fn namespace(&self) -> ClassNamespace {
        ClassNamespace::new(&self.namespace_prefix)
    }

    /// Options for the decomposer.
    pub fn decompose_options(&self) -> DecomposeOptions {
        DecomposeOptions {
            max_refinement_steps: self.max_refinement_steps,
        }
    }
}

/// A non-empty run of `[A-Za-z0-9_-]` that does not start with a digit, or
/// with a hyphen followed by a digit.
fn is_identifier_start(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    let valid_chars = bytes
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-'));
    match bytes {
        [] => false,
        [first, ..] if first.is_ascii_digit() => false,
        [b'-'] => false,
        [b'-', second, ..] if second.is_ascii_digit() => false,
        _ => valid_chars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.namespace_prefix, "x-");
        assert_eq!(config.rule_prefix, "q");
        assert!(config.keep_passthrough_rules);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            "namespace_prefix = \"u-\"\nselector_policy = \"reject\"\nmax_refinement_steps = 8\n",
        )
        .unwrap();

        assert_eq!(config.namespace_prefix, "u-");
        assert_eq!(config.rule_prefix, "q");
        assert_eq!(config.selector_policy, SelectorPolicy::Reject);
        assert_eq!(config.decompose_options().max_refinement_steps, Some(8));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("namespace = \"x-\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn toml_round_trip() {
        let config = Config {
            rule_prefix: "m_".into(),
            max_refinement_steps: Some(3),
            ..Config::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn prefix_validation() {
        for (rule_prefix, ok) in [
            ("q", true),
            ("_m", true),
            ("-m", true),
            ("gen-", true),
            ("", false),
            ("1q", false),
            ("-", false),
            ("-1", false),
            ("q.", false),
            ("q q", false),
        ] {
            let config = Config {
                rule_prefix: rule_prefix.into(),
                ..Config::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "rule prefix {rule_prefix:?}");
        }

        let config = Config {
            namespace_prefix: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
