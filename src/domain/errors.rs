// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines every error that can occur while reading, writing, or
//! synchronizing constrained configuration values. All errors use `thiserror` for
//! proper error handling and conversion.

use thiserror::Error;

/// The main error type for configuration operations.
///
/// Every variant carries enough context (names, paths, attempted and expected
/// descriptors) to diagnose the failure without access to the source. It is marked as
/// `#[non_exhaustive]` to allow for future additions without breaking backwards
/// compatibility.
///
/// # Examples
///
/// ```
/// use safecfg::domain::errors::ConfigError;
///
/// fn lookup_group() -> Result<(), ConfigError> {
///     Err(ConfigError::UnknownName {
///         name: "logging".to_string(),
///         container: "myConfig".to_string(),
///     })
/// }
///
/// assert!(lookup_group().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A typed accessor was used with a type whose kind differs from the target's kind.
    #[error("Type mismatch on {target}: attempted to use `{attempted}`, but the value holds `{expected}`")]
    TypeMismatch {
        /// What was accessed (a value, a property, a document node)
        target: String,
        /// The type name the caller asked for
        attempted: String,
        /// The type name actually held by the target
        expected: String,
    },

    /// A property's current (or newly written) value fails its constraint.
    #[error("Value {value} of property '{property}' is invalid: expected {constraint}")]
    ConstraintViolation {
        /// The property name
        property: String,
        /// The offending value, rendered for display
        value: String,
        /// A description of the constraint that was violated
        constraint: String,
    },

    /// A property's constraint was replaced with a constraint of a different variant.
    #[error("Cannot replace the {current} constraint of property '{property}' with an unrelated {attempted} constraint")]
    ConstraintKindMismatch {
        /// The property name
        property: String,
        /// The variant currently installed
        current: String,
        /// The variant the caller tried to install
        attempted: String,
    },

    /// A constraint was built from an invalid definition.
    #[error("Invalid constraint definition: {message}")]
    InvalidConstraintDefinition {
        /// What is wrong with the definition
        message: String,
    },

    /// An item with the same name already exists in its container.
    #[error("Unable to insert '{name}' into '{container}': another item with the same name already exists")]
    DuplicateName {
        /// The duplicated name
        name: String,
        /// The name of the container rejecting the insertion
        container: String,
    },

    /// No item with the given name exists in its container.
    #[error("'{name}' does not exist in '{container}'")]
    UnknownName {
        /// The missing name
        name: String,
        /// The name of the container that was searched
        container: String,
    },

    /// A group exists under the requested name but has a different concrete type.
    #[error("Unable to get group '{name}' in the specified type: expected `{expected}`")]
    GroupTypeMismatch {
        /// The group name
        name: String,
        /// The requested Rust type
        expected: String,
    },

    /// A document node expected to hold a value is absent or empty.
    #[error("Expected document node '{path}' to contain a value")]
    EmptyValue {
        /// The dotted path of the empty node
        path: String,
    },

    /// A document node holds a value that cannot be converted to the requested kind.
    #[error("Cannot convert document node '{path}': {message}")]
    DocumentError {
        /// The dotted path of the node
        path: String,
        /// Why the conversion failed
        message: String,
    },

    /// A document file could not be located, read, or written.
    #[error("Document file '{path}' error: {message}")]
    FileError {
        /// The file path (or file name) involved
        path: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a document.
    #[error("Failed to parse document: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConfigError {
    /// Creates a `TypeMismatch` error.
    pub fn type_mismatch(
        target: impl Into<String>,
        attempted: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ConfigError::TypeMismatch {
            target: target.into(),
            attempted: attempted.into(),
            expected: expected.into(),
        }
    }

    /// Creates an `InvalidConstraintDefinition` error.
    pub fn invalid_constraint(message: impl Into<String>) -> Self {
        ConfigError::InvalidConstraintDefinition {
            message: message.into(),
        }
    }

    /// Creates an `EmptyValue` error for the given path.
    pub fn empty_value(path: impl Into<String>) -> Self {
        ConfigError::EmptyValue { path: path.into() }
    }

    /// Creates a `DocumentError` for a node whose value has the wrong shape.
    pub fn document(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::DocumentError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Prefixes the document path carried by this error with `prefix`.
    ///
    /// Only `EmptyValue` and `DocumentError` carry a path; every other variant is
    /// returned unchanged. Groups use this while unwinding so the final error names
    /// the full dotted path from the outermost configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use safecfg::domain::errors::ConfigError;
    ///
    /// let error = ConfigError::empty_value("logging.level").within("myConfig");
    /// assert_eq!(
    ///     error.to_string(),
    ///     "Expected document node 'myConfig.logging.level' to contain a value"
    /// );
    /// ```
    pub fn within(self, prefix: &str) -> Self {
        match self {
            ConfigError::EmptyValue { path } => ConfigError::EmptyValue {
                path: join_path(prefix, &path),
            },
            ConfigError::DocumentError { path, message } => ConfigError::DocumentError {
                path: join_path(prefix, &path),
                message,
            },
            other => other,
        }
    }
}

fn join_path(prefix: &str, path: &str) -> String {
    if path.is_empty() {
        prefix.to_string()
    } else {
        format!("{}.{}", prefix, path)
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
