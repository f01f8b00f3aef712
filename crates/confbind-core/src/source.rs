//! Configuration source abstraction
//!
//! The load engine only ever talks to a [`ConfigSource`]. Concrete
//! providers (files, environment, in-memory maps) live in `confbind-sources`.

use std::sync::Arc;

use crate::error::Result;

/// A key/value provider the load engine reads raw strings from
pub trait ConfigSource: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// Behaviour for an absent key is up to the provider; the usual answer is
    /// [`Error::MissingKey`](crate::Error::MissingKey).
    fn get(&self, key: &str) -> Result<String>;

    /// Whether `key` is present. Must not fail.
    fn has(&self, key: &str) -> bool;
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Arc<S> {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }
}
