//! In-memory source

use std::collections::HashMap;

use confbind_core::{ConfigSource, Error, Result};

/// Key/value pairs held in memory
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are held
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Result<String> {
        self.values.get(key).cloned().ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })
    }

    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}
