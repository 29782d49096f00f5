//! Module system contract types
//!
//! Defines the types shared between the registry, loader, and session:
//! module metadata, the option schema contract, the session context passed
//! into every module run, and the module error taxonomy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Statically extracted module metadata
///
/// Produced by shallow text inspection of a module source file, without
/// executing it. Extraction is best-effort: either field may be empty when
/// the heuristics find nothing, and that is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Human-readable description (empty when extraction found none)
    pub description: String,
    /// Declared option names, in order of first appearance
    pub options: Vec<String>,
}

/// Declared schema for a single module option
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSpec {
    /// Whether the option must be set before a meaningful run
    pub required: bool,
    /// Declared default value, if any
    pub default: Option<String>,
    /// Human-readable description
    pub description: String,
}

/// Ordered option schema declared by a loaded module
///
/// Owned by the loaded module and immutable after load. Declaration order
/// is preserved so option listings are stable.
#[derive(Debug, Clone, Default)]
pub struct OptionsSchema {
    entries: Vec<(String, OptionSpec)>,
}

impl OptionsSchema {
    /// Build a schema from ordered (name, spec) pairs
    pub fn from_entries(entries: Vec<(String, OptionSpec)>) -> Self {
        Self { entries }
    }

    /// Look up a declared option by name
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Whether `name` is a declared option
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Number of declared options
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the module declares no options
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An option with its effective value resolved for display or execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    /// Option name
    pub name: String,
    /// Effective value: the session override if set, else the schema default
    pub value: Option<String>,
    /// Whether the schema marks this option required
    pub required: bool,
    /// Schema default value
    pub default: Option<String>,
    /// Schema description
    pub description: String,
}

/// Long-lived key/value environment passed into every module run
///
/// Owned by the shell engine and outliving any single module session.
/// Values are strings; modules read what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    values: HashMap<String, String>,
}

impl SessionContext {
    /// Create a context seeded with the invoking user and platform
    pub fn from_environment() -> Self {
        let mut ctx = Self::default();
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        ctx.set("user", user);
        ctx.set("platform", std::env::consts::OS.to_string());
        ctx
    }

    /// Set a context value
    pub fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a context value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    /// Get a context value with a default
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .map(|s| s.as_str())
            .unwrap_or(default)
            .to_string()
    }

    /// Iterate all context entries
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.values.iter()
    }
}

/// Module system errors
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("Load error: {0}")]
    LoadError(String),

    #[error("Run error: {0}")]
    RunError(String),

    #[error("Module operation failed: {0}")]
    OperationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_preserves_declaration_order() {
        let schema = OptionsSchema::from_entries(vec![
            ("ZULU".to_string(), OptionSpec::default()),
            ("ALPHA".to_string(), OptionSpec::default()),
        ]);
        let names: Vec<&str> = schema.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["ZULU", "ALPHA"]);
    }

    #[test]
    fn schema_lookup() {
        let schema = OptionsSchema::from_entries(vec![(
            "MSG".to_string(),
            OptionSpec {
                required: true,
                default: Some(String::new()),
                description: "Message to echo".to_string(),
            },
        )]);
        assert!(schema.contains("MSG"));
        assert!(!schema.contains("msg"));
        assert!(schema.get("MSG").map(|s| s.required).unwrap_or(false));
    }

    #[test]
    fn context_defaults() {
        let mut ctx = SessionContext::default();
        assert_eq!(ctx.get_or("user", "nobody"), "nobody");
        ctx.set("user", "alice".to_string());
        assert_eq!(ctx.get_or("user", "nobody"), "alice");
    }
}
