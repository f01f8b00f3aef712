//! Element-wise mapping over lists

use async_trait::async_trait;
use serde_json::Value;

use super::{FieldContext, Transform};
use crate::error::Result;

/// Apply a transform to each element of a list, see [`map`]
pub struct Map {
    inner: Box<dyn Transform>,
    name: String,
}

/// Apply `inner` to every element of a list value.
///
/// Elements are processed one at a time in input order, so the output order
/// matches the input even when `inner` is asynchronous. The field context is
/// passed through to `inner` unchanged.
pub fn map(inner: impl Transform + 'static) -> Map {
    let name = format!("map({})", inner.name());
    Map {
        inner: Box::new(inner),
        name,
    }
}

#[async_trait]
impl Transform for Map {
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, value: Value, cx: &FieldContext<'_>) -> Result<Value> {
        let Value::Array(items) = value else {
            return Err(cx.error(&self.name, "expected a list value"));
        };

        let mut results = Vec::with_capacity(items.len());
        for item in items {
            results.push(self.inner.apply(item, cx).await?);
        }
        Ok(Value::Array(results))
    }
}
