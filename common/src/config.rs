//! Environment variable parsing helpers
//!
//! Configuration is read through an [`EnvSource`] so binaries can use the real
//! process environment while tests inject a plain map.

use std::collections::HashMap;
use std::env;

/// A named source of configuration values.
///
/// Only `raw` needs implementing; the rest are conveniences built on it.
/// Empty values are treated the same as unset ones.
pub trait EnvSource {
    /// Raw value of `name`, if set.
    fn raw(&self, name: &str) -> Option<String>;

    /// Value of `name`, or `None` when unset or empty.
    fn var(&self, name: &str) -> Option<String> {
        self.raw(name).filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    ///
    /// # Example
    /// ```ignore
    /// let bin = ProcessEnv.var_or("MONGOSH_BIN", "mongosh");
    /// ```
    fn var_or(&self, name: &str, default: &str) -> String {
        self.var(name).unwrap_or_else(|| default.to_string())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn raw(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn raw(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_is_unset() {
        let env = HashMap::from([("EMPTY", ""), ("SET", "value")]);
        assert_eq!(env.var("EMPTY"), None);
        assert_eq!(env.var("SET").as_deref(), Some("value"));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn test_default_applies_to_unset_and_empty() {
        let env = HashMap::from([("EMPTY", ""), ("HOST", "mongo")]);
        assert_eq!(env.var_or("HOST", "localhost"), "mongo");
        assert_eq!(env.var_or("EMPTY", "localhost"), "localhost");
        assert_eq!(env.var_or("MISSING", "localhost"), "localhost");
    }
}
