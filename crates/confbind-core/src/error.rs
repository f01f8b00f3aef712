//! Error types for confbind-core

use thiserror::Error;

/// Result type alias for confbind-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while declaring bindings or loading configuration
#[derive(Error, Debug)]
pub enum Error {
    /// A field was given more than one binding on the same type
    #[error(
        "configuration definition error: multiple keys or nested bindings specified for field '{field}' on {type_name}"
    )]
    DuplicateBinding {
        /// Type the binding was declared on
        type_name: &'static str,
        /// Field that was bound twice
        field: String,
    },

    /// The target type never declared any bindings
    #[error(
        "cannot load configuration, {type_name} is not declared for configuration loading"
    )]
    NotLoadable {
        /// Type of the target
        type_name: &'static str,
    },

    /// Declaring a parent would make the type its own ancestor
    #[error("configuration definition error: {type_name} cannot extend itself through its ancestors")]
    AncestryCycle {
        /// Type whose ancestry loops back on itself
        type_name: &'static str,
    },

    /// The configuration source does not contain the requested key
    #[error("config source does not have key '{key}'")]
    MissingKey {
        /// Key that was requested
        key: String,
    },

    /// The configuration source failed to produce a value
    #[error("config source failed to read '{key}': {message}")]
    Source {
        /// Key that was requested
        key: String,
        /// Description of the failure
        message: String,
    },

    /// A transform in a field's chain failed
    #[error("transform error in '{transform}' for field '{field}': {message}")]
    Transform {
        /// Name of the transform
        transform: String,
        /// Field being loaded
        field: String,
        /// Description of the error
        message: String,
    },

    /// A resolved value could not be stored into the target field
    #[error("cannot assign field '{field}': {source}")]
    Assign {
        /// Field being assigned
        field: String,
        /// Underlying conversion error
        source: serde_json::Error,
    },

    /// A binding names a field the target does not have
    #[error("{type_name} has no field '{field}'")]
    UnknownField {
        /// Type of the target
        type_name: &'static str,
        /// Field that was not recognised
        field: String,
    },

    /// A nested sub-instance could not be converted into a value
    #[error("cannot serialize nested {type_name}: {source}")]
    Serialize {
        /// Type of the nested object
        type_name: &'static str,
        /// Underlying serialization error
        source: serde_json::Error,
    },
}

impl Error {
    /// Build a transform error for `field`
    pub fn transform(
        transform: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Transform {
            transform: transform.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a source error for `key`
    pub fn read_failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Build an unknown-field error for the target type `T`
    pub fn unknown_field<T: ?Sized>(field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: std::any::type_name::<T>(),
            field: field.into(),
        }
    }

    /// Errors raised by an incorrect declaration rather than by the data
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateBinding { .. } | Self::NotLoadable { .. } | Self::AncestryCycle { .. }
        )
    }

    /// Errors raised by the configuration source
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::MissingKey { .. } | Self::Source { .. })
    }

    /// Errors raised by a transform
    pub fn is_transform_error(&self) -> bool {
        matches!(self, Self::Transform { .. })
    }
}
