//! Optional fields
//!
//! An optional field is only loaded when its presence predicate passes.
//! By default the predicate checks that the source has the field's key.
//! When the predicate fails, the field gets its default value if it has
//! one, and is otherwise left untouched.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::source::ConfigSource;

/// What a presence predicate gets to look at
pub struct PresenceContext<'a> {
    /// The object being loaded
    pub target: &'a (dyn Any + Send + Sync),
    /// The source the object is loaded from
    pub source: &'a dyn ConfigSource,
    /// Field being considered
    pub field: &'a str,
    /// Key the field is bound to, `None` for nested bindings
    pub source_key: Option<&'a str>,
}

impl<'a> PresenceContext<'a> {
    /// The target downcast to its concrete type
    pub fn target_as<T: Any>(&self) -> Option<&'a T> {
        self.target.downcast_ref::<T>()
    }
}

/// Custom presence predicate
pub type Predicate = Arc<dyn Fn(&PresenceContext<'_>) -> bool + Send + Sync>;

/// How an optional field decides whether to load
#[derive(Clone)]
pub enum Presence {
    /// Load when the source has the field's key; nested fields always load
    SourceHasKey,
    /// Load when the predicate returns true
    Custom(Predicate),
}

impl Presence {
    /// Evaluate against `cx`
    pub fn check(&self, cx: &PresenceContext<'_>) -> bool {
        match self {
            Self::SourceHasKey => cx.source_key.is_none_or(|key| cx.source.has(key)),
            Self::Custom(predicate) => predicate(cx),
        }
    }
}

impl fmt::Debug for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceHasKey => f.write_str("SourceHasKey"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Optional-field declaration, not yet attached to a field
#[derive(Debug, Clone)]
pub struct Optional {
    presence: Presence,
    default: Option<Value>,
}

impl Optional {
    /// Load only when the source has the key; no default
    pub fn present() -> Self {
        Self {
            presence: Presence::SourceHasKey,
            default: None,
        }
    }

    /// Load when the source has the key, otherwise use `default`
    pub fn with_default(default: impl Into<Value>) -> Self {
        Self {
            presence: Presence::SourceHasKey,
            default: Some(default.into()),
        }
    }

    /// Load only when `predicate` passes; no default
    pub fn predicate<P>(predicate: P) -> Self
    where
        P: Fn(&PresenceContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            presence: Presence::Custom(Arc::new(predicate)),
            default: None,
        }
    }

    /// Load when `predicate` passes, otherwise use `default`
    pub fn predicate_with_default<P>(predicate: P, default: impl Into<Value>) -> Self
    where
        P: Fn(&PresenceContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            presence: Presence::Custom(Arc::new(predicate)),
            default: Some(default.into()),
        }
    }

    pub(crate) fn into_record(self, field: impl Into<String>) -> OptionalRecord {
        OptionalRecord {
            field: field.into(),
            presence: self.presence,
            default: self.default,
        }
    }
}

/// Optional-field resolution attached to a named field
#[derive(Debug, Clone)]
pub struct OptionalRecord {
    field: String,
    presence: Presence,
    default: Option<Value>,
}

impl OptionalRecord {
    /// Field this record applies to
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The presence check
    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Value used when the presence check fails
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the field should be loaded
    pub fn should_load(&self, cx: &PresenceContext<'_>) -> bool {
        self.presence.check(cx)
    }
}
