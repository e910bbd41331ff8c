use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Column filter map handed verbatim to the loader.
///
/// Keys are kept ordered so that two filters with the same entries always
/// serialize to the same text, which is what the reload decision compares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Set a single entry, overwriting any previous value for the column.
    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.0.insert(column.into(), value);
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.0.remove(column)
    }

    /// Merge `other` into `self`: same keys are overwritten, other keys kept.
    pub fn merge(&mut self, other: Filter) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Entries whose value is not `null`.
    pub fn active(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter().filter(|(_, value)| !value.is_null())
    }

    /// Stable text form used for structural comparison.
    pub fn canonical(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Filter(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<BTreeMap<String, Value>> for Filter {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Filter(map)
    }
}
