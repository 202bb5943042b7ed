// SPDX-License-Identifier: MIT OR Apache-2.0

//! A type-safe configuration model with constrained properties.
//!
//! This crate models configuration as named values bound to constraints, grouped
//! into a named tree that is synchronized with an external JSON-like document.
//! Invalid states (a value of the wrong kind, a value outside its constraint, a
//! duplicate or missing name) are reported as errors instead of silently accepted.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: values, constraints, properties, groups and configurations
//! - **Ports**: the traits a document must implement (`DocumentNode`, `DocumentFormat`)
//! - **Adapters**: in-memory, JSON and YAML documents, and file loading
//!
//! # Model
//!
//! - A [`Value`](domain::Value) holds exactly one integer, real or text.
//! - A [`Constraint`](domain::Constraint) is either an inclusive range or a set of
//!   choices, and fixes the kind of the values it accepts.
//! - A [`Property`](domain::Property) binds a name, a constraint and a value. Writes
//!   take effect before they are validated; reads always re-validate.
//! - A [`Group`](domain::Group) maps its state to its own document node, and a
//!   [`Configuration`](domain::Configuration) is the group of uniquely named groups.
//!
//! # Feature Flags
//!
//! - `json`: Enable the `serde_json` document adapter (default)
//! - `yaml`: Enable the `serde_yaml` document adapter (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use safecfg::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let logging = PropertyGroup::new("logging")
//!     .with_property(Property::choice("level", ["debug", "info", "warn"])?)?
//!     .with_property(Property::range("flushPeriodInSeconds", 0_i64, 9000)?)?;
//!
//! let mut config = Configuration::new("myConfig");
//! config.insert(logging)?;
//!
//! let document = json!({
//!     "myConfig": { "logging": { "level": "warn", "flushPeriodInSeconds": 30 } }
//! });
//! config.write_from_document(&document)?;
//!
//! let logging = config.get_typed::<PropertyGroup>("logging")?;
//! assert_eq!(logging.get::<String>("level")?, "warn");
//!
//! let mut out = serde_json::Value::Null;
//! config.read_into_document(&mut out)?;
//! assert_eq!(out, document);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, Configuration, Constraint, Group, Property, PropertyGroup, Result,
        SyncMode, Value, ValueKind,
    };
    pub use crate::ports::{DocumentFormat, DocumentNode};

    pub use crate::adapters::MemoryNode;
    // Re-export adapters based on feature flags
    #[cfg(feature = "json")]
    pub use crate::adapters::JsonFormat;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlFormat;
}
