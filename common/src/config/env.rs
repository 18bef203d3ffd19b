//! Environment variable sources.

use std::collections::HashMap;

/// Read-only view over environment variables.
///
/// Empty values are reported as unset, so `FOO=` behaves like a missing
/// variable everywhere configuration is read.
pub trait EnvSource {
    /// Returns the raw value stored under `key`, empty or not.
    fn raw(&self, key: &str) -> Option<String>;

    /// Returns the value of `key` if it is set and non-empty.
    fn var(&self, key: &str) -> Option<String> {
        self.raw(key).filter(|v| !v.trim().is_empty())
    }

    /// Returns the first non-empty value among `keys`.
    fn first_of(&self, keys: &[&str]) -> Option<(String, String)> {
        keys.iter()
            .find_map(|k| self.var(k).map(|v| (k.to_string(), v)))
    }

    /// Parses `key` as a boolean flag (`true`/`1`, case-insensitive).
    fn flag(&self, key: &str) -> bool {
        self.var(key)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false)
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn raw(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}
