// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the configuration model.
//!
//! This module contains values, constraints, properties and the group tree. It is
//! independent of any document format; documents are reached only through the
//! [`DocumentNode`](crate::ports::DocumentNode) port.

pub mod configuration;
pub mod constraint;
pub mod errors;
pub mod group;
pub mod property;
pub mod property_group;
pub mod value;

// Re-export commonly used types
pub use configuration::{Configuration, SyncMode};
pub use constraint::{ChoiceConstraint, Constraint, ConstraintVariant, RangeConstraint};
pub use errors::{ConfigError, Result};
pub use group::{Group, GroupBase};
pub use property::Property;
pub use property_group::PropertyGroup;
pub use value::{IntoValue, Numeric, Value, ValueKind, ValueType};
