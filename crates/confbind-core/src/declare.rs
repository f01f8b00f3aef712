//! Declaration API
//!
//! Binding metadata is attached to a type by explicit calls made once, at
//! initialization, before any instance is loaded.
//!
//! # Example
//!
//! ```rust,ignore
//! impl Configurable for DatabaseConfig {
//!     fn declare(decl: &mut Declaration<'_, Self>) -> Result<()> {
//!         decl.bind("url", Binding::key("database.url"))?
//!             .bind("pool_size", Binding::key("database.pool").transform(as_number()))?
//!             .optional("pool_size", Optional::with_default(10))
//!             .bind("replica", Binding::nested::<ReplicaConfig>())?
//!             .optional("replica", Optional::predicate(|cx| cx.source.has("replica.url")));
//!         Ok(())
//!     }
//! }
//!
//! registry.register::<ReplicaConfig>()?.register::<DatabaseConfig>()?;
//! ```

use std::marker::PhantomData;

use crate::binding::Binding;
use crate::error::Result;
use crate::optional::Optional;
use crate::registry::Registry;
use crate::target::Loadable;

/// A type that carries its own binding declarations
pub trait Configurable: Loadable + Sized {
    /// Declare this type's bindings
    fn declare(decl: &mut Declaration<'_, Self>) -> Result<()>;
}

/// Records bindings for `T` into a [`Registry`]
pub struct Declaration<'r, T> {
    registry: &'r mut Registry,
    _target: PhantomData<fn() -> T>,
}

impl<'r, T: Loadable> Declaration<'r, T> {
    pub(crate) fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            _target: PhantomData,
        }
    }

    /// Bind `field` to a key or nested binding.
    ///
    /// Fails with a definition error if `field` is already bound on `T`.
    pub fn bind(&mut self, field: impl Into<String>, binding: Binding) -> Result<&mut Self> {
        self.registry
            .record_binding::<T>(binding.into_record(field))?;
        Ok(self)
    }

    /// Bind `field` to `key` with no transforms
    pub fn key(&mut self, field: impl Into<String>, key: impl Into<String>) -> Result<&mut Self> {
        self.bind(field, Binding::key(key))
    }

    /// Bind `field` to a nested `S` with no transforms
    pub fn nested<S>(&mut self, field: impl Into<String>) -> Result<&mut Self>
    where
        S: Loadable + Default + serde::Serialize,
    {
        self.bind(field, Binding::nested::<S>())
    }

    /// Mark `field` optional
    pub fn optional(&mut self, field: impl Into<String>, optional: Optional) -> &mut Self {
        self.registry.record_optional::<T>(optional.into_record(field));
        self
    }

    /// Inherit the bindings declared for `P`
    pub fn extends<P: 'static>(&mut self) -> Result<&mut Self> {
        self.registry.set_parent::<T, P>()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transforms::as_number;
    use serde_json::Value;

    #[derive(Default)]
    struct SampleConfig;

    impl Loadable for SampleConfig {
        fn assign(&mut self, field: &str, _value: Value) -> Result<()> {
            Err(Error::unknown_field::<Self>(field))
        }
    }

    impl Configurable for SampleConfig {
        fn declare(decl: &mut Declaration<'_, Self>) -> Result<()> {
            decl.key("setting1", "a.setting")?
                .bind("setting2", Binding::key("another.setting").transform(as_number()))?
                .optional("setting2", Optional::with_default(0))
                .key("setting3", "more.setting")?;
            Ok(())
        }
    }

    #[test]
    fn test_register_records_declarations() {
        let mut registry = Registry::new();
        registry.register::<SampleConfig>().unwrap();

        let bindings = registry.bindings::<SampleConfig>().unwrap();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[1].field(), "setting2");
        assert_eq!(bindings[1].transforms().len(), 1);
        assert!(registry.optionals::<SampleConfig>().contains_key("setting2"));
    }

    #[test]
    fn test_registering_twice_is_a_definition_error() {
        let mut registry = Registry::new();
        registry.register::<SampleConfig>().unwrap();
        let err = registry.register::<SampleConfig>().unwrap_err();
        assert!(err.is_definition_error());
    }

    #[test]
    fn test_two_keys_on_one_field_fail_at_declaration() {
        let mut registry = Registry::new();
        let mut decl = registry.declare::<SampleConfig>();
        decl.key("field", "first.key").unwrap();
        let err = decl.key("field", "second.key").err().unwrap();
        assert!(matches!(err, Error::DuplicateBinding { .. }));
    }
}
