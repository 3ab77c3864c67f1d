use crate::domain::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The full state document of one thermostat at one point in time, in the order the API sent it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(IndexMap<String, FieldValue>);

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Returns the value of the first key that is present and not null.
    pub fn first_present(&self, keys: &[&str]) -> Option<&FieldValue> {
        keys.iter().filter_map(|key| self.get(key)).find(|value| !value.is_null())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Snapshot(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}
