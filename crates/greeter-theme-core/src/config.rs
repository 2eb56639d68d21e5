//! Read-only access to the greeter's configuration store.

use std::collections::HashMap;

/// Typed lookups into an external configuration source. Keys are
/// `section/Name` strings; a missing key reads as `None`.
pub trait ConfigAccessor {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_int(&self, key: &str) -> Option<i64>;
    fn get_string(&self, key: &str) -> Option<String>;
}

/// A configuration held in memory as raw strings.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

impl ConfigAccessor for MapConfig {
    fn get_bool(&self, key: &str) -> Option<bool> {
        let raw = self.values.get(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key)?.trim().parse().ok()
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
