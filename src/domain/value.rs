// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kind-tagged configuration values.
//!
//! This module provides the closed set of value kinds ([`ValueKind`]), the tagged
//! container holding one value of one kind ([`Value`]), and the traits that map Rust
//! types onto kinds ([`ValueType`] for reads, [`IntoValue`] for writes).

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a configuration value.
///
/// Every value, constraint, and property carries exactly one kind at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A signed integer, stored as `i64`
    Integer,
    /// A floating point number, stored as `f64`
    Real,
    /// A string, stored as `String`
    Text,
}

impl ValueKind {
    /// Returns the name of the Rust type used to read values of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use safecfg::domain::ValueKind;
    ///
    /// assert_eq!(ValueKind::Real.type_name(), "f64");
    /// ```
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Integer => "i64",
            ValueKind::Real => "f64",
            ValueKind::Text => "String",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "integer",
            ValueKind::Real => "real",
            ValueKind::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// A container holding exactly one value of one [`ValueKind`].
///
/// Equality is kind-aware: `Value::Integer(1)` is never equal to `Value::Real(1.0)`.
/// The kind of a value is fixed once it is built; the typed mutator [`Value::set`]
/// only replaces the payload.
///
/// # Examples
///
/// ```
/// use safecfg::domain::{Value, ValueKind};
///
/// let mut value = Value::default_for(ValueKind::Integer);
/// value.set(42).unwrap();
/// assert_eq!(value.get::<i64>().unwrap(), 42);
/// assert!(value.get::<String>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// An integer payload
    Integer(i64),
    /// A real payload
    Real(f64),
    /// A text payload
    Text(String),
}

impl Value {
    /// Returns the default value of the given kind: `0`, `0.0`, or an empty string.
    pub fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Integer => Value::Integer(0),
            ValueKind::Real => Value::Real(0.0),
            ValueKind::Text => Value::Text(String::new()),
        }
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Returns the name of the Rust type this value is read as.
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// Reads the payload as `T`.
    ///
    /// Fails with [`ConfigError::TypeMismatch`] if `T` does not map to this value's
    /// kind.
    pub fn get<T: ValueType>(&self) -> Result<T> {
        ensure_kind("value", T::KIND.type_name(), T::KIND, self.kind())?;
        T::from_value(self).ok_or_else(|| {
            ConfigError::type_mismatch("value", T::KIND.type_name(), self.type_name())
        })
    }

    /// Replaces the payload with `value`.
    ///
    /// Fails with [`ConfigError::TypeMismatch`] if the kind of `value` differs from
    /// this value's kind; the payload is left unchanged in that case.
    pub fn set<V: IntoValue>(&mut self, value: V) -> Result<()> {
        ensure_kind("value", V::KIND.type_name(), V::KIND, self.kind())?;
        *self = value.into_value();
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// Fails with `TypeMismatch` unless `attempted_kind` equals `actual`.
pub(crate) fn ensure_kind(
    target: &str,
    attempted: &str,
    attempted_kind: ValueKind,
    actual: ValueKind,
) -> Result<()> {
    if attempted_kind == actual {
        Ok(())
    } else {
        Err(ConfigError::type_mismatch(
            target,
            attempted,
            actual.type_name(),
        ))
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i64 {}
    impl Sealed for i32 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for &str {}
}

/// A Rust type that values of one [`ValueKind`] can be read as.
///
/// Implemented for `i64` (integer), `f64` (real) and `String` (text). The trait is
/// sealed: the set of kinds is closed.
pub trait ValueType: sealed::Sealed + Sized {
    /// The kind this type maps to
    const KIND: ValueKind;

    /// Extracts `Self` from `value`, or `None` if the kinds differ.
    fn from_value(value: &Value) -> Option<Self>;
}

impl ValueType for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl ValueType for f64 {
    const KIND: ValueKind = ValueKind::Real;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }
}

impl ValueType for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// A Rust type that can be written into a value of one [`ValueKind`].
///
/// Besides the three storage types this also accepts `i32` (widened to an integer)
/// and `&str`, so plain literals can be passed to setters.
pub trait IntoValue: sealed::Sealed {
    /// The kind this type maps to
    const KIND: ValueKind;

    /// Converts `self` into a [`Value`] of kind [`IntoValue::KIND`].
    fn into_value(self) -> Value;
}

impl IntoValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoValue for i32 {
    const KIND: ValueKind = ValueKind::Integer;

    fn into_value(self) -> Value {
        Value::Integer(i64::from(self))
    }
}

impl IntoValue for f64 {
    const KIND: ValueKind = ValueKind::Real;

    fn into_value(self) -> Value {
        Value::Real(self)
    }
}

impl IntoValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for &str {
    const KIND: ValueKind = ValueKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

/// Numeric types accepted as range constraint bounds.
pub trait Numeric: ValueType + IntoValue + PartialOrd + Copy + fmt::Display {}

impl Numeric for i64 {}
impl Numeric for f64 {}
