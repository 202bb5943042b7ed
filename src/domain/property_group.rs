// SPDX-License-Identifier: MIT OR Apache-2.0

//! A ready-made leaf group holding a bundle of properties.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::group::Group;
use crate::domain::property::Property;
use crate::domain::value::{IntoValue, ValueType};
use crate::ports::DocumentNode;

/// A named bundle of properties, each mapped to the document key of its name.
///
/// Properties keep their insertion order, which is also the order in which they are
/// read from and written to documents. [`Group::write_from`] is all-or-nothing: if
/// any property fails, every property is restored to the value it held before.
/// [`Group::write_partial_from`] keeps the properties written before the failure,
/// and a value rejected by its constraint stays stored in its property.
///
/// # Examples
///
/// ```rust
/// use safecfg::adapters::MemoryNode;
/// use safecfg::domain::{Group, Property, PropertyGroup};
/// use safecfg::ports::DocumentNode;
///
/// let mut logging = PropertyGroup::new("logging")
///     .with_property(Property::choice("level", ["debug", "info", "warn"]).unwrap())
///     .unwrap()
///     .with_property(Property::range("flushPeriodInSeconds", 0_i64, 9000).unwrap())
///     .unwrap();
///
/// logging.set("level", "info").unwrap();
/// assert_eq!(logging.get::<String>("level").unwrap(), "info");
///
/// let mut node = MemoryNode::new();
/// logging.read_into(&mut node).unwrap();
/// assert_eq!(node.at("flushPeriodInSeconds"), Some(&MemoryNode::from(0_i64)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyGroup {
    name: String,
    properties: Vec<Property>,
}

impl PropertyGroup {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Adds `property` and returns the group, for chained construction.
    ///
    /// Fails with [`ConfigError::DuplicateName`] if a property with the same name is
    /// already present.
    pub fn with_property(mut self, property: Property) -> Result<Self> {
        self.add(property)?;
        Ok(self)
    }

    /// Adds `property`.
    ///
    /// Fails with [`ConfigError::DuplicateName`] if a property with the same name is
    /// already present.
    pub fn add(&mut self, property: Property) -> Result<()> {
        if self.contains(property.name()) {
            return Err(ConfigError::DuplicateName {
                name: property.name().to_string(),
                container: self.name.clone(),
            });
        }
        self.properties.push(property);
        Ok(())
    }

    /// Returns `true` if a property named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name() == name)
    }

    /// Returns the property named `name`.
    ///
    /// Fails with [`ConfigError::UnknownName`] if there is none.
    pub fn property(&self, name: &str) -> Result<&Property> {
        self.properties
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| self.unknown(name))
    }

    /// Returns the property named `name` for modification.
    ///
    /// Fails with [`ConfigError::UnknownName`] if there is none.
    pub fn property_mut(&mut self, name: &str) -> Result<&mut Property> {
        match self.properties.iter().position(|p| p.name() == name) {
            Some(index) => Ok(&mut self.properties[index]),
            None => Err(self.unknown(name)),
        }
    }

    /// Returns all properties in insertion order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Reads property `name` as `T`; see [`Property::get_value`].
    pub fn get<T: ValueType>(&self, name: &str) -> Result<T> {
        self.property(name)?.get_value()
    }

    /// Writes `value` into property `name`; see [`Property::set_value`].
    pub fn set<V: IntoValue>(&mut self, name: &str, value: V) -> Result<()> {
        self.property_mut(name)?.set_value(value)
    }

    fn unknown(&self, name: &str) -> ConfigError {
        ConfigError::UnknownName {
            name: name.to_string(),
            container: self.name.clone(),
        }
    }

    fn apply(&mut self, node: &dyn DocumentNode) -> Result<()> {
        for property in self.properties.iter_mut() {
            let key = property.name().to_string();
            let value = node
                .descend(&key)?
                .read_value(property.kind())
                .map_err(|e| e.within(&key))?;
            property.set_raw(value)?;
        }
        Ok(())
    }
}

impl Group for PropertyGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_from(&mut self, node: &dyn DocumentNode) -> Result<()> {
        let snapshot = self.properties.clone();
        if let Err(e) = self.apply(node) {
            tracing::debug!("Restoring group '{}' after failed update: {}", self.name, e);
            self.properties = snapshot;
            return Err(e);
        }
        Ok(())
    }

    fn write_partial_from(&mut self, node: &dyn DocumentNode) -> Result<()> {
        self.apply(node)
    }

    fn read_into(&self, node: &mut dyn DocumentNode) -> Result<()> {
        for property in &self.properties {
            let value = property.checked_value()?;
            node.child_mut(property.name())
                .write_value(value)
                .map_err(|e| e.within(property.name()))?;
        }
        Ok(())
    }
}
