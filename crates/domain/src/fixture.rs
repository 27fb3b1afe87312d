//! Shared fixture state.
//!
//! Values captured by one case and read by later cases of the same suite
//! run. The runner creates a fresh [`FixtureState`] per run and drops it
//! when the run ends.

use std::collections::HashMap;

use serde_json::Value;

/// String-keyed store of captured JSON values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureState {
    values: HashMap<String, Value>,
}

impl FixtureState {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Renders the value under `key` for substitution into a path: strings
    /// without quotes, everything else as compact JSON.
    #[must_use]
    pub fn render(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Returns true if `key` has been written.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
