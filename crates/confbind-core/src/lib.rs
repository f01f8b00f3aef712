//! Confbind Core Library
//!
//! Declarative configuration binding: a type declares, once, which
//! configuration key (or nested type) feeds each of its fields and how the
//! raw value is refined. The load engine then fills instances of that type
//! from any [`ConfigSource`].
//!
//! - Binding metadata store ([`Registry`])
//! - Key and nested bindings with transform chains ([`Binding`])
//! - Optional fields with defaults and presence predicates ([`Optional`])
//! - Transform library ([`transforms`])
//! - Load engine ([`load_configuration`])
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Declaration │────▶│  Registry   │────▶│ Load Engine │
//! │ (per type)  │     │ (metadata)  │     │ (per load)  │
//! └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                │
//!                            ConfigSource ───────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use confbind_core::{Binding, Optional, Registry, transforms::as_number};
//!
//! let mut registry = Registry::new();
//! registry
//!     .declare::<ServerConfig>()
//!     .bind("host", Binding::key("server.host"))?
//!     .bind("port", Binding::key("server.port").transform(as_number()))?
//!     .optional("port", Optional::with_default(8080));
//!
//! let config: ServerConfig = registry.load_new(&source).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binding;
pub mod declare;
pub mod engine;
pub mod error;
pub mod optional;
pub mod registry;
pub mod source;
pub mod target;
pub mod transforms;

pub use binding::{Binding, BindingRecord, Loader, bind, bind_nested};
pub use declare::{Configurable, Declaration};
pub use engine::load_configuration;
pub use error::{Error, Result};
pub use optional::{Optional, OptionalRecord, PresenceContext};
pub use registry::Registry;
pub use source::ConfigSource;
pub use target::{Loadable, assign_value};
pub use transforms::{FieldContext, Transform};

/// Dynamically typed value flowing through loaders and transforms
pub use serde_json::Value;
