//! Value transforms
//!
//! A transform refines a loaded value before it is assigned. Transforms run
//! left to right; each one receives the output of the previous one. Any of
//! them may be asynchronous, and the next one only starts once the previous
//! one has finished.
//!
//! # Built-in Transforms
//!
//! - `as_number` - Numeric coercion (non-numeric input becomes null)
//! - `as_boolean` - `true` iff the string is `"true"`, ignoring case
//! - `split` - Split a string on a literal delimiter
//! - `map` - Apply a transform to every element of a list, in order
//! - `trim` - Strip leading and trailing whitespace
//!
//! Closures become transforms through [`from_fn`], [`from_fn_with_context`]
//! and [`from_async_fn`].
//!
//! # Example
//!
//! ```rust,ignore
//! Binding::key("server.ports")
//!     .transform(split(","))
//!     .transform(map(trim()))
//!     .transform(map(as_number()))
//! ```

use std::any::Any;
use std::fmt::Display;
use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};

mod convert;
mod map;
mod text;

pub use convert::{AsBoolean, AsNumber, as_boolean, as_number};
pub use map::{Map, map};
pub use text::{Split, Trim, split, trim};

/// Field being loaded, handed to every transform in its chain
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    target: &'a (dyn Any + Send + Sync),
    field: &'a str,
}

impl<'a> FieldContext<'a> {
    /// Create a context for `field` on `target`
    pub fn new(target: &'a (dyn Any + Send + Sync), field: &'a str) -> Self {
        Self { target, field }
    }

    /// Name of the field being loaded
    pub fn field(&self) -> &'a str {
        self.field
    }

    /// The object being loaded, as it stands before this field is assigned
    pub fn target(&self) -> &'a (dyn Any + Send + Sync) {
        self.target
    }

    /// The target downcast to its concrete type
    pub fn target_as<T: Any>(&self) -> Option<&'a T> {
        self.target.downcast_ref::<T>()
    }

    /// Build a transform error for this field
    pub fn error(&self, transform: &str, message: impl Into<String>) -> Error {
        Error::transform(transform, self.field, message)
    }
}

impl std::fmt::Debug for FieldContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldContext")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// A step in a field's transform chain
#[async_trait]
pub trait Transform: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Refine `value` for the field described by `cx`
    async fn apply(&self, value: Value, cx: &FieldContext<'_>) -> Result<Value>;
}

/// Transform backed by a synchronous closure over the value
pub struct FnTransform<F> {
    name: String,
    f: F,
}

/// Wrap a synchronous closure as a transform
pub fn from_fn<F, E>(name: impl Into<String>, f: F) -> FnTransform<F>
where
    F: Fn(Value) -> std::result::Result<Value, E> + Send + Sync,
    E: Display,
{
    FnTransform {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<F, E> Transform for FnTransform<F>
where
    F: Fn(Value) -> std::result::Result<Value, E> + Send + Sync,
    E: Display,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, value: Value, cx: &FieldContext<'_>) -> Result<Value> {
        (self.f)(value).map_err(|e| cx.error(&self.name, e.to_string()))
    }
}

/// Transform backed by a synchronous closure that also sees the field context
pub struct ContextFnTransform<F> {
    name: String,
    f: F,
}

/// Wrap a context-aware synchronous closure as a transform
pub fn from_fn_with_context<F, E>(name: impl Into<String>, f: F) -> ContextFnTransform<F>
where
    F: Fn(Value, &FieldContext<'_>) -> std::result::Result<Value, E> + Send + Sync,
    E: Display,
{
    ContextFnTransform {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<F, E> Transform for ContextFnTransform<F>
where
    F: Fn(Value, &FieldContext<'_>) -> std::result::Result<Value, E> + Send + Sync,
    E: Display,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, value: Value, cx: &FieldContext<'_>) -> Result<Value> {
        (self.f)(value, cx).map_err(|e| cx.error(&self.name, e.to_string()))
    }
}

/// Transform backed by a closure returning a future
pub struct AsyncFnTransform<F> {
    name: String,
    f: F,
}

/// Wrap an asynchronous closure as a transform
pub fn from_async_fn<F, Fut, E>(name: impl Into<String>, f: F) -> AsyncFnTransform<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<Value, E>> + Send,
    E: Display + Send,
{
    AsyncFnTransform {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<F, Fut, E> Transform for AsyncFnTransform<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<Value, E>> + Send,
    E: Display + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, value: Value, cx: &FieldContext<'_>) -> Result<Value> {
        (self.f)(value)
            .await
            .map_err(|e| cx.error(&self.name, e.to_string()))
    }
}

/// Render a scalar as the string a text transform works on
fn scalar_text(transform: &str, value: Value, cx: &FieldContext<'_>) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(cx.error(transform, "value is null")),
        Value::Array(_) | Value::Object(_) => {
            Err(cx.error(transform, "expected a scalar value, found a list or object"))
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub struct Target;

    pub async fn run(transform: &dyn Transform, value: Value) -> Result<Value> {
        let cx = FieldContext::new(&Target, "field");
        transform.apply(value, &cx).await
    }
}
