//! Confbind Sources
//!
//! Concrete [`ConfigSource`](confbind_core::ConfigSource) implementations:
//!
//! - [`MapSource`] - in-memory key/value map
//! - [`EnvSource`] - process environment (`server.port` → `SERVER_PORT`)
//! - [`YamlSource`] - YAML document addressed by dotted paths
//! - [`LayeredSource`] - several sources consulted in precedence order
//!
//! # Example
//!
//! ```rust,ignore
//! use confbind_sources::{EnvSource, LayeredSource, YamlSource};
//!
//! let source = LayeredSource::new()
//!     .with(EnvSource::from_env().with_prefix("APP"))
//!     .with(YamlSource::from_path("config/default.yaml")?);
//!
//! let config: ServerConfig = registry.load_new(&source).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod env;
pub mod error;
pub mod layered;
pub mod map;
pub mod yaml;

pub use env::EnvSource;
pub use error::{Error, Result};
pub use layered::LayeredSource;
pub use map::MapSource;
pub use yaml::YamlSource;
