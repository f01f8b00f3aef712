//! YAML file source
//!
//! Keys are dotted paths into the document: `server.tls.cert` reads
//! `cert` under `tls` under `server`. Numeric path segments index into
//! sequences. Scalars are returned as strings; a sequence of scalars is
//! returned comma-joined, so `split(",")` turns it back into a list.
//!
//! # Example
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//!   origins:
//!     - https://a.example
//!     - https://b.example
//! ```

use std::path::Path;

use confbind_core::{ConfigSource, Error as CoreError, Result as CoreResult};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// A parsed YAML document
#[derive(Debug, Clone)]
pub struct YamlSource {
    root: Value,
    origin: String,
}

impl YamlSource {
    /// Parse a YAML document held in memory
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self {
            root: serde_yaml::from_str(text)?,
            origin: "<inline>".to_string(),
        })
    }

    /// Read and parse a YAML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let root = serde_yaml::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded YAML configuration");
        Ok(Self {
            root,
            origin: path.display().to_string(),
        })
    }

    /// Where the document came from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(node) = self.root.get(key) {
            return Some(node);
        }

        key.split('.').try_fold(&self.root, |node, segment| match node {
            Value::Sequence(_) => segment.parse::<usize>().ok().and_then(|i| node.get(i)),
            _ => node.get(segment),
        })
    }

    fn render(&self, key: &str, node: &Value) -> CoreResult<String> {
        match node {
            Value::Sequence(items) => {
                let parts = items
                    .iter()
                    .map(|item| {
                        scalar_text(item).ok_or_else(|| {
                            CoreError::read_failed(
                                key,
                                format!("{}: sequence holds a non-scalar item", self.origin),
                            )
                        })
                    })
                    .collect::<CoreResult<Vec<String>>>()?;
                Ok(parts.join(","))
            }
            Value::Mapping(_) => Err(CoreError::read_failed(
                key,
                format!("{}: value is a mapping, not a scalar", self.origin),
            )),
            other => scalar_text(other).ok_or_else(|| CoreError::MissingKey {
                key: key.to_string(),
            }),
        }
    }
}

fn scalar_text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

impl ConfigSource for YamlSource {
    fn get(&self, key: &str) -> CoreResult<String> {
        match self.lookup(key) {
            Some(node) if !node.is_null() => self.render(key, node),
            _ => Err(CoreError::MissingKey {
                key: key.to_string(),
            }),
        }
    }

    fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some_and(|node| !node.is_null())
    }
}
