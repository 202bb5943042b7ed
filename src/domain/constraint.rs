// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation rules over configuration values.
//!
//! A [`Constraint`] is either a [`RangeConstraint`] (inclusive numeric bounds) or a
//! [`ChoiceConstraint`] (a finite list of allowed values). Constraints are immutable
//! once built; changing the rule of a property means installing a new constraint.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::value::{IntoValue, Numeric, Value, ValueKind};
use std::fmt;

/// The variant of a constraint, used to decide which replacements are allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintVariant {
    /// Inclusive lower and upper bound
    Range,
    /// Finite set of allowed values
    Choice,
}

impl fmt::Display for ConstraintVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintVariant::Range => write!(f, "range"),
            ConstraintVariant::Choice => write!(f, "choice"),
        }
    }
}

/// Inclusive bounds over integer or real values.
///
/// # Examples
///
/// ```
/// use safecfg::domain::{RangeConstraint, Value};
///
/// let range = RangeConstraint::new(0_i64, 10).unwrap();
/// assert!(range.is_valid(&Value::Integer(10)));
/// assert!(!range.is_valid(&Value::Integer(11)));
/// assert!(!range.is_valid(&Value::Real(5.0)));
///
/// assert!(RangeConstraint::new(10_i64, 0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RangeConstraint {
    lower: Value,
    upper: Value,
}

impl RangeConstraint {
    /// Creates a range constraint over `[lower, upper]`.
    ///
    /// Fails with [`ConfigError::InvalidConstraintDefinition`] if `lower > upper` or if
    /// the bounds cannot be ordered (a NaN bound).
    pub fn new<T: Numeric>(lower: T, upper: T) -> Result<Self> {
        match lower.partial_cmp(&upper) {
            Some(std::cmp::Ordering::Greater) => Err(ConfigError::invalid_constraint(format!(
                "lower bound {} cannot be greater than upper bound {}",
                lower, upper
            ))),
            None => Err(ConfigError::invalid_constraint(format!(
                "bounds {} and {} cannot be ordered",
                lower, upper
            ))),
            Some(_) => Ok(Self {
                lower: lower.into_value(),
                upper: upper.into_value(),
            }),
        }
    }

    /// Returns the kind of the bounds.
    pub fn kind(&self) -> ValueKind {
        self.lower.kind()
    }

    /// Returns the inclusive lower bound.
    pub fn lower(&self) -> &Value {
        &self.lower
    }

    /// Returns the inclusive upper bound.
    pub fn upper(&self) -> &Value {
        &self.upper
    }

    /// Returns `true` if `value` has the bounds' kind and lies within them.
    pub fn is_valid(&self, value: &Value) -> bool {
        match (value, &self.lower, &self.upper) {
            (Value::Integer(v), Value::Integer(lo), Value::Integer(hi)) => lo <= v && v <= hi,
            (Value::Real(v), Value::Real(lo), Value::Real(hi)) => lo <= v && v <= hi,
            _ => false,
        }
    }
}

impl fmt::Display for RangeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range [{}, {}]", self.lower, self.upper)
    }
}

/// A non-empty, ordered list of allowed values of one kind.
///
/// # Examples
///
/// ```
/// use safecfg::domain::{ChoiceConstraint, Value};
///
/// let levels = ChoiceConstraint::new(vec!["debug", "info"]).unwrap();
/// assert!(levels.is_valid(&Value::from("info")));
/// assert!(!levels.is_valid(&Value::from("trace")));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceConstraint {
    choices: Vec<Value>,
}

impl ChoiceConstraint {
    /// Creates a choice constraint from the allowed values.
    ///
    /// Fails with [`ConfigError::InvalidConstraintDefinition`] if `choices` is empty.
    pub fn new<T, I>(choices: I) -> Result<Self>
    where
        T: IntoValue,
        I: IntoIterator<Item = T>,
    {
        let choices: Vec<Value> = choices.into_iter().map(IntoValue::into_value).collect();
        if choices.is_empty() {
            return Err(ConfigError::invalid_constraint(
                "the list of choices cannot be empty",
            ));
        }
        Ok(Self { choices })
    }

    /// Returns the kind of the allowed values.
    pub fn kind(&self) -> ValueKind {
        // Non-empty by construction, and every choice shares the type `T` it was built from.
        self.choices[0].kind()
    }

    /// Returns the allowed values in their original order.
    pub fn choices(&self) -> &[Value] {
        &self.choices
    }

    /// Returns `true` if `value` equals one of the choices (kind and payload).
    pub fn is_valid(&self, value: &Value) -> bool {
        self.choices.iter().any(|choice| choice == value)
    }
}

impl fmt::Display for ChoiceConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "one of [")?;
        for (i, choice) in self.choices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", choice)?;
        }
        write!(f, "]")
    }
}

/// A validation rule over a [`Value`].
///
/// # Examples
///
/// ```
/// use safecfg::domain::{Constraint, ConstraintVariant, Value, ValueKind};
///
/// let constraint = Constraint::range(0.0, 1.0).unwrap();
/// assert_eq!(constraint.variant(), ConstraintVariant::Range);
/// assert_eq!(constraint.kind(), ValueKind::Real);
/// assert!(constraint.is_valid(&Value::Real(0.25)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    /// Inclusive numeric bounds
    Range(RangeConstraint),
    /// Finite set of allowed values
    Choice(ChoiceConstraint),
}

impl Constraint {
    /// Creates a range constraint; see [`RangeConstraint::new`].
    pub fn range<T: Numeric>(lower: T, upper: T) -> Result<Self> {
        RangeConstraint::new(lower, upper).map(Constraint::Range)
    }

    /// Creates a choice constraint; see [`ChoiceConstraint::new`].
    pub fn choice<T, I>(choices: I) -> Result<Self>
    where
        T: IntoValue,
        I: IntoIterator<Item = T>,
    {
        ChoiceConstraint::new(choices).map(Constraint::Choice)
    }

    /// Returns the variant of this constraint.
    pub fn variant(&self) -> ConstraintVariant {
        match self {
            Constraint::Range(_) => ConstraintVariant::Range,
            Constraint::Choice(_) => ConstraintVariant::Choice,
        }
    }

    /// Returns the kind of values this constraint accepts.
    pub fn kind(&self) -> ValueKind {
        match self {
            Constraint::Range(range) => range.kind(),
            Constraint::Choice(choice) => choice.kind(),
        }
    }

    /// Returns `true` if `value` satisfies this constraint.
    ///
    /// Never fails: a value of another kind is simply invalid.
    pub fn is_valid(&self, value: &Value) -> bool {
        match self {
            Constraint::Range(range) => range.is_valid(value),
            Constraint::Choice(choice) => choice.is_valid(value),
        }
    }
}

impl From<RangeConstraint> for Constraint {
    fn from(range: RangeConstraint) -> Self {
        Constraint::Range(range)
    }
}

impl From<ChoiceConstraint> for Constraint {
    fn from(choice: ChoiceConstraint) -> Self {
        Constraint::Choice(choice)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Range(range) => range.fmt(f),
            Constraint::Choice(choice) => choice.fmt(f),
        }
    }
}
