//! Layered source
//!
//! Consults several sources in order; the first one that has a key wins.
//! Typical use puts environment overrides in front of file defaults.

use confbind_core::{ConfigSource, Error, Result};

/// Sources in precedence order, highest first
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn ConfigSource>>,
}

impl LayeredSource {
    /// Create a source with no layers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer below the ones already present
    pub fn with(mut self, source: impl ConfigSource + 'static) -> Self {
        self.push(source);
        self
    }

    /// Add a layer below the ones already present
    pub fn push(&mut self, source: impl ConfigSource + 'static) {
        self.layers.push(Box::new(source));
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether there are no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ConfigSource for LayeredSource {
    fn get(&self, key: &str) -> Result<String> {
        let (index, layer) = self
            .layers
            .iter()
            .enumerate()
            .find(|(_, layer)| layer.has(key))
            .ok_or_else(|| Error::MissingKey {
                key: key.to_string(),
            })?;
        tracing::trace!(key, layer = index, "resolved key from layer");
        layer.get(key)
    }

    fn has(&self, key: &str) -> bool {
        self.layers.iter().any(|layer| layer.has(key))
    }
}
