//! Field bindings
//!
//! A binding ties one field to a [`Loader`] that produces its raw value and
//! to the ordered transforms that refine it. There are two kinds:
//!
//! - key bindings read a single key from the [`ConfigSource`]
//! - nested bindings build a default sub-object and load it recursively
//!   from the same source

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::engine::load_configuration;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::source::ConfigSource;
use crate::target::Loadable;
use crate::transforms::Transform;

/// Produces the raw, pre-transform value for a field
#[async_trait]
pub trait Loader: Send + Sync {
    /// The single source key this loader reads, if it reads one
    fn source_key(&self) -> Option<&str>;

    /// Short description for logs
    fn describe(&self) -> String;

    /// Produce the raw value from `source`
    async fn load(&self, registry: &Registry, source: &dyn ConfigSource) -> Result<Value>;
}

/// Reads one key from the source
#[derive(Debug, Clone)]
pub struct KeyLoader {
    key: String,
}

impl KeyLoader {
    /// Create a loader for `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[async_trait]
impl Loader for KeyLoader {
    fn source_key(&self) -> Option<&str> {
        Some(&self.key)
    }

    fn describe(&self) -> String {
        format!("key '{}'", self.key)
    }

    async fn load(&self, _registry: &Registry, source: &dyn ConfigSource) -> Result<Value> {
        source.get(&self.key).map(Value::String)
    }
}

/// Builds a default `S` and loads it from the same source
pub struct NestedLoader<S> {
    _marker: PhantomData<fn() -> S>,
}

impl<S> NestedLoader<S> {
    /// Create a loader for sub-objects of type `S`
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S> Default for NestedLoader<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> Loader for NestedLoader<S>
where
    S: Loadable + Default + Serialize,
{
    fn source_key(&self) -> Option<&str> {
        None
    }

    fn describe(&self) -> String {
        format!("nested {}", type_name::<S>())
    }

    async fn load(&self, registry: &Registry, source: &dyn ConfigSource) -> Result<Value> {
        let mut sub = S::default();
        load_configuration(registry, &mut sub, source).await?;
        serde_json::to_value(&sub).map_err(|source| Error::Serialize {
            type_name: type_name::<S>(),
            source,
        })
    }
}

/// A loader plus its transform chain, not yet attached to a field
#[derive(Clone)]
pub struct Binding {
    loader: Arc<dyn Loader>,
    transforms: Vec<Arc<dyn Transform>>,
}

impl Binding {
    /// Bind to a single key in the source
    pub fn key(key: impl Into<String>) -> Self {
        Self::with_loader(KeyLoader::new(key))
    }

    /// Bind to a sub-object of type `S`, loaded recursively
    pub fn nested<S>() -> Self
    where
        S: Loadable + Default + Serialize,
    {
        Self::with_loader(NestedLoader::<S>::new())
    }

    /// Bind to a custom loader
    pub fn with_loader(loader: impl Loader + 'static) -> Self {
        Self {
            loader: Arc::new(loader),
            transforms: Vec::new(),
        }
    }

    /// Append a transform to the chain
    pub fn transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Arc::new(transform));
        self
    }

    /// Append several already shared transforms to the chain, in order
    pub fn transforms<I>(mut self, transforms: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Transform>>,
    {
        self.transforms.extend(transforms);
        self
    }

    pub(crate) fn into_record(self, field: impl Into<String>) -> BindingRecord {
        BindingRecord {
            field: field.into(),
            loader: self.loader,
            transforms: self.transforms,
        }
    }
}

/// Shorthand for [`Binding::key`]
pub fn bind(key: impl Into<String>) -> Binding {
    Binding::key(key)
}

/// Shorthand for [`Binding::nested`]
pub fn bind_nested<S>() -> Binding
where
    S: Loadable + Default + Serialize,
{
    Binding::nested::<S>()
}

/// A binding attached to a named field, as stored in the [`Registry`]
#[derive(Clone)]
pub struct BindingRecord {
    field: String,
    loader: Arc<dyn Loader>,
    transforms: Vec<Arc<dyn Transform>>,
}

impl BindingRecord {
    /// Create a record directly, bypassing the declaration builder
    pub fn new(
        field: impl Into<String>,
        loader: Arc<dyn Loader>,
        transforms: Vec<Arc<dyn Transform>>,
    ) -> Self {
        Self {
            field: field.into(),
            loader,
            transforms,
        }
    }

    /// Field this record populates
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Loader producing the raw value
    pub fn loader(&self) -> &dyn Loader {
        self.loader.as_ref()
    }

    /// Source key read by the loader, `None` for nested bindings
    pub fn source_key(&self) -> Option<&str> {
        self.loader.source_key()
    }

    /// Transforms applied to the loaded value, in order
    pub fn transforms(&self) -> &[Arc<dyn Transform>] {
        &self.transforms
    }
}

impl fmt::Debug for BindingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let transforms: Vec<&str> = self.transforms.iter().map(|t| t.name()).collect();
        f.debug_struct("BindingRecord")
            .field("field", &self.field)
            .field("loader", &self.loader.describe())
            .field("transforms", &transforms)
            .finish()
    }
}
