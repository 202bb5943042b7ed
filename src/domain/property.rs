// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named values bound to a constraint.
//!
//! A [`Property`] couples an immutable name, a replaceable [`Constraint`] and the
//! current [`Value`]. Validation is lazy: writes take effect before they are checked,
//! and every read re-checks the stored value against the current constraint. A
//! property may therefore hold a value that is currently invalid, but it never hands
//! one out.

use crate::domain::constraint::Constraint;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::value::{ensure_kind, IntoValue, Numeric, Value, ValueKind, ValueType};

/// A named value that is validated against a constraint on every access.
///
/// # Examples
///
/// ```
/// use safecfg::domain::{Constraint, Property};
///
/// let mut period = Property::range("flushPeriodInSeconds", 0_i64, 9000).unwrap();
/// assert_eq!(period.get_value::<i64>().unwrap(), 0);
///
/// // The write happens, then validation fails; the property now holds -1.
/// assert!(period.set_value(-1).is_err());
/// assert!(period.get_value::<i64>().is_err());
///
/// period.set_value(60).unwrap();
/// assert_eq!(period.get_value::<i64>().unwrap(), 60);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    name: String,
    constraint: Constraint,
    value: Value,
}

impl Property {
    /// Creates a property holding the default value of the constraint's kind.
    ///
    /// The default is not validated here; a choice property whose choices do not
    /// include the default stays invalid until a valid value is set.
    pub fn new(name: impl Into<String>, constraint: Constraint) -> Self {
        let value = Value::default_for(constraint.kind());
        Self {
            name: name.into(),
            constraint,
            value,
        }
    }

    /// Creates a property constrained to the inclusive range `[lower, upper]`.
    pub fn range<T: Numeric>(name: impl Into<String>, lower: T, upper: T) -> Result<Self> {
        Ok(Self::new(name, Constraint::range(lower, upper)?))
    }

    /// Creates a property constrained to the given choices.
    pub fn choice<T, I>(name: impl Into<String>, choices: I) -> Result<Self>
    where
        T: IntoValue,
        I: IntoIterator<Item = T>,
    {
        Ok(Self::new(name, Constraint::choice(choices)?))
    }

    /// Returns the property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the installed constraint.
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Returns the kind of the stored value.
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Returns the stored value without validating it.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns `true` if the stored value satisfies the constraint.
    pub fn is_valid(&self) -> bool {
        self.constraint.is_valid(&self.value)
    }

    /// Reads the stored value as `T`.
    ///
    /// The stored value is re-validated first: if it does not satisfy the current
    /// constraint the call fails with [`ConfigError::ConstraintViolation`], whatever
    /// `T` is. A valid value read as a `T` of another kind fails with
    /// [`ConfigError::TypeMismatch`].
    pub fn get_value<T: ValueType>(&self) -> Result<T> {
        self.ensure_valid()?;
        ensure_kind(&self.target(), T::KIND.type_name(), T::KIND, self.kind())?;
        self.value.get()
    }

    /// Returns the stored value if it satisfies the current constraint.
    pub fn checked_value(&self) -> Result<&Value> {
        self.ensure_valid()?;
        Ok(&self.value)
    }

    /// Writes `value`, then validates it.
    ///
    /// Fails with [`ConfigError::TypeMismatch`] without touching the stored value if
    /// the kind of `value` differs from the property's kind. Otherwise the write takes
    /// effect, and if the new value violates the constraint the call fails with
    /// [`ConfigError::ConstraintViolation`] while the invalid value stays stored.
    pub fn set_value<V: IntoValue>(&mut self, value: V) -> Result<()> {
        ensure_kind(&self.target(), V::KIND.type_name(), V::KIND, self.kind())?;
        self.value.set(value)?;
        self.ensure_valid()
    }

    /// Writes an already-built value with the same rules as [`Property::set_value`].
    pub fn set_raw(&mut self, value: Value) -> Result<()> {
        ensure_kind(&self.target(), value.type_name(), value.kind(), self.kind())?;
        self.value = value;
        self.ensure_valid()
    }

    /// Replaces the constraint.
    ///
    /// Fails with [`ConfigError::ConstraintKindMismatch`] if `constraint` is of a
    /// different variant than the installed one. If the value kind changes, the stored
    /// value is reset to the new kind's default. Otherwise the stored value is kept
    /// as is, even if the new constraint rejects it.
    pub fn set_constraint(&mut self, constraint: Constraint) -> Result<()> {
        if constraint.variant() != self.constraint.variant() {
            return Err(ConfigError::ConstraintKindMismatch {
                property: self.name.clone(),
                current: self.constraint.variant().to_string(),
                attempted: constraint.variant().to_string(),
            });
        }

        if constraint.kind() != self.kind() {
            tracing::debug!(
                "Property '{}' changes kind from {} to {}; resetting its value",
                self.name,
                self.kind(),
                constraint.kind()
            );
            self.value = Value::default_for(constraint.kind());
        }

        tracing::debug!(
            "Property '{}' constraint replaced: {} -> {}",
            self.name,
            self.constraint,
            constraint
        );
        self.constraint = constraint;
        Ok(())
    }

    fn ensure_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ConfigError::ConstraintViolation {
                property: self.name.clone(),
                value: self.value.to_string(),
                constraint: self.constraint.to_string(),
            })
        }
    }

    fn target(&self) -> String {
        format!("property '{}'", self.name)
    }
}
