//! Shared fixtures for integration tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use confbind_core::{ConfigSource, Error, Result};

/// Source backed by a plain map that counts `get` calls
#[derive(Default)]
pub struct ObjectSource {
    values: HashMap<String, String>,
    reads: AtomicUsize,
}

impl ObjectSource {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            reads: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ConfigSource for ObjectSource {
    fn get(&self, key: &str) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.values.get(key).cloned().ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })
    }

    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

