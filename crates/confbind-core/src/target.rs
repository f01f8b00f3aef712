//! Load targets
//!
//! Anything the engine fills in implements [`Loadable`]. The engine hands it
//! a field name and a resolved [`Value`]; the type decides how to store it.

use std::any::Any;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// A type whose fields can be assigned by the load engine
///
/// # Example
///
/// ```rust,ignore
/// impl Loadable for ServerConfig {
///     fn assign(&mut self, field: &str, value: Value) -> Result<()> {
///         match field {
///             "host" => assign_value(&mut self.host, field, value),
///             "port" => assign_value(&mut self.port, field, value),
///             _ => Err(Error::unknown_field::<Self>(field)),
///         }
///     }
/// }
/// ```
pub trait Loadable: Any + Send + Sync {
    /// Store `value` into the field called `field`
    fn assign(&mut self, field: &str, value: Value) -> Result<()>;
}

/// Deserialize `value` into `slot`, reporting failures against `field`.
///
/// An `Option<T>` slot receives `None` for a null value, which is what
/// [`as_number`](crate::transforms::as_number) yields for non-numeric input.
pub fn assign_value<T: DeserializeOwned>(slot: &mut T, field: &str, value: Value) -> Result<()> {
    *slot = serde_json::from_value(value).map_err(|source| Error::Assign {
        field: field.to_string(),
        source,
    })?;
    Ok(())
}
