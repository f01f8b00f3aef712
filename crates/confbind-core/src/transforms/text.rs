//! String transforms

use async_trait::async_trait;
use serde_json::Value;

use super::{FieldContext, Transform, scalar_text};
use crate::error::Result;

/// Split a string into a list, see [`split`]
#[derive(Debug, Clone)]
pub struct Split {
    delimiter: String,
    name: String,
}

/// Split a string value into a list of strings on a literal delimiter.
///
/// A value without the delimiter yields a one-element list. An empty
/// delimiter splits into individual characters.
pub fn split(delimiter: impl Into<String>) -> Split {
    let delimiter = delimiter.into();
    Split {
        name: format!("split({delimiter:?})"),
        delimiter,
    }
}

impl Split {
    /// The delimiter this transform splits on
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

#[async_trait]
impl Transform for Split {
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, value: Value, cx: &FieldContext<'_>) -> Result<Value> {
        let text = scalar_text(&self.name, value, cx)?;
        let parts: Vec<Value> = if self.delimiter.is_empty() {
            text.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            text.split(self.delimiter.as_str())
                .map(|part| Value::String(part.to_string()))
                .collect()
        };
        Ok(Value::Array(parts))
    }
}

/// Whitespace trimming, see [`trim`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Trim;

/// Remove leading and trailing whitespace, newlines included
pub fn trim() -> Trim {
    Trim
}

#[async_trait]
impl Transform for Trim {
    fn name(&self) -> &str {
        "trim"
    }

    async fn apply(&self, value: Value, cx: &FieldContext<'_>) -> Result<Value> {
        let text = scalar_text("trim", value, cx)?;
        Ok(Value::String(text.trim().to_string()))
    }
}
