// SPDX-License-Identifier: MIT OR Apache-2.0

//! The composite group owning uniquely named child groups.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::group::Group;
use crate::ports::DocumentNode;
use std::collections::BTreeMap;

/// How a [`Configuration`] behaves when a child group fails during
/// [`Group::write_from`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// Every child is restored to its previous state; the configuration is unchanged.
    #[default]
    Atomic,
    /// Nothing is restored. Groups and properties updated before the failure keep
    /// their new values, and the property that failed its constraint keeps the
    /// rejected value.
    Partial,
}

/// A named group of uniquely named child groups.
///
/// A configuration maps each child to the document key of the child's name, so a
/// property `P` of group `G` in configuration `C` lives at the document path `C.G.P`.
/// Configurations nest: a configuration is itself a [`Group`] and can be inserted into
/// another one.
///
/// Lookups come in pairs: the plain method fails with a descriptive error, the
/// `_silent` variant returns `None` (or `false`) instead.
///
/// # Examples
///
/// ```rust
/// use safecfg::adapters::MemoryNode;
/// use safecfg::domain::{Configuration, Property, PropertyGroup};
///
/// let logging = PropertyGroup::new("logging")
///     .with_property(Property::choice("level", ["debug", "info"]).unwrap())
///     .unwrap();
///
/// let mut config = Configuration::new("myConfig");
/// config.insert(logging).unwrap();
///
/// let document = MemoryNode::map([(
///     "myConfig",
///     MemoryNode::map([("logging", MemoryNode::map([("level", MemoryNode::from("info"))]))]),
/// )]);
/// config.write_from_document(&document).unwrap();
///
/// let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
/// assert_eq!(logging.get::<String>("level").unwrap(), "info");
/// ```
#[derive(Clone, Debug)]
pub struct Configuration {
    name: String,
    groups: BTreeMap<String, Box<dyn Group>>,
    mode: SyncMode,
}

impl Configuration {
    /// Creates an empty configuration using [`SyncMode::Atomic`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: BTreeMap::new(),
            mode: SyncMode::default(),
        }
    }

    /// Sets how [`Group::write_from`] handles failures.
    pub fn with_sync_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the synchronization mode.
    pub fn sync_mode(&self) -> SyncMode {
        self.mode
    }

    /// Inserts `group` under its name.
    ///
    /// Fails with [`ConfigError::DuplicateName`] if a group with the same name exists;
    /// the configuration is left unchanged.
    pub fn insert<G: Group + 'static>(&mut self, group: G) -> Result<()> {
        self.insert_boxed(Box::new(group))
    }

    /// Inserts an already boxed group; see [`Configuration::insert`].
    pub fn insert_boxed(&mut self, group: Box<dyn Group>) -> Result<()> {
        if self.groups.contains_key(group.name()) {
            return Err(ConfigError::DuplicateName {
                name: group.name().to_string(),
                container: self.name.clone(),
            });
        }
        tracing::debug!("Inserting group '{}' into '{}'", group.name(), self.name);
        self.groups.insert(group.name().to_string(), group);
        Ok(())
    }

    /// Inserts `group`, returning `false` instead of failing on a duplicate name.
    pub fn insert_silent<G: Group + 'static>(&mut self, group: G) -> bool {
        self.insert(group).is_ok()
    }

    /// Removes and returns the group named `name`.
    ///
    /// Fails with [`ConfigError::UnknownName`] if there is none.
    pub fn remove(&mut self, name: &str) -> Result<Box<dyn Group>> {
        match self.groups.remove(name) {
            Some(group) => {
                tracing::debug!("Removed group '{}' from '{}'", name, self.name);
                Ok(group)
            }
            None => Err(self.unknown(name)),
        }
    }

    /// Removes and returns the group named `name`, if present.
    pub fn remove_silent(&mut self, name: &str) -> Option<Box<dyn Group>> {
        self.remove(name).ok()
    }

    /// Returns the group named `name`.
    ///
    /// Fails with [`ConfigError::UnknownName`] if there is none.
    pub fn get(&self, name: &str) -> Result<&dyn Group> {
        self.get_silent(name).ok_or_else(|| self.unknown(name))
    }

    /// Returns the group named `name`, if present.
    pub fn get_silent(&self, name: &str) -> Option<&dyn Group> {
        self.groups.get(name).map(|g| g.as_ref())
    }

    /// Returns the group named `name` for modification.
    ///
    /// Fails with [`ConfigError::UnknownName`] if there is none.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut (dyn Group + 'static)> {
        let container = &self.name;
        match self.groups.get_mut(name) {
            Some(group) => Ok(group.as_mut()),
            None => Err(ConfigError::UnknownName {
                name: name.to_string(),
                container: container.clone(),
            }),
        }
    }

    /// Returns the group named `name` for modification, if present.
    pub fn get_mut_silent(&mut self, name: &str) -> Option<&mut (dyn Group + 'static)> {
        self.groups.get_mut(name).map(|g| g.as_mut())
    }

    /// Returns the group named `name` as its concrete type `T`.
    ///
    /// Fails with [`ConfigError::UnknownName`] if there is no such group and with
    /// [`ConfigError::GroupTypeMismatch`] if the group is not a `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safecfg::domain::{ConfigError, Configuration, PropertyGroup};
    ///
    /// let mut config = Configuration::new("app");
    /// config.insert(PropertyGroup::new("logging")).unwrap();
    ///
    /// assert!(config.get_typed::<PropertyGroup>("logging").is_ok());
    /// assert!(matches!(
    ///     config.get_typed::<Configuration>("logging"),
    ///     Err(ConfigError::GroupTypeMismatch { .. })
    /// ));
    /// ```
    pub fn get_typed<T: Group + 'static>(&self, name: &str) -> Result<&T> {
        self.get(name)?
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| group_type_mismatch::<T>(name))
    }

    /// Returns the group named `name` as a `T`, or `None` if it is absent or of
    /// another type.
    pub fn get_typed_silent<T: Group + 'static>(&self, name: &str) -> Option<&T> {
        self.get_silent(name)?.as_any().downcast_ref::<T>()
    }

    /// Returns the group named `name` as a mutable `T`; see
    /// [`Configuration::get_typed`].
    pub fn get_typed_mut<T: Group + 'static>(&mut self, name: &str) -> Result<&mut T> {
        self.get_mut(name)?
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| group_type_mismatch::<T>(name))
    }

    /// Returns the group named `name` as a mutable `T`, or `None` if it is absent or
    /// of another type.
    pub fn get_typed_mut_silent<T: Group + 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut_silent(name)?.as_any_mut().downcast_mut::<T>()
    }

    /// Returns `true` if a group named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Returns the child group names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Returns the child groups in ascending name order.
    pub fn groups(&self) -> impl Iterator<Item = &dyn Group> {
        self.groups.values().map(|g| g.as_ref())
    }

    /// Returns the number of child groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the configuration has no child groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Updates the configuration from the document node stored under its name in
    /// `root`.
    ///
    /// Fails with [`ConfigError::EmptyValue`] naming the configuration if `root` has
    /// no such node. Paths in document errors start with the configuration name.
    pub fn write_from_document(&mut self, root: &dyn DocumentNode) -> Result<()> {
        tracing::debug!("Synchronizing '{}' from document", self.name);
        let node = root.descend(&self.name)?;
        self.write_from(node).map_err(|e| e.within(&self.name))?;
        tracing::debug!("Synchronized {} group(s) of '{}'", self.groups.len(), self.name);
        Ok(())
    }

    /// Stores the configuration under its name in `root`, creating missing nodes.
    pub fn read_into_document(&self, root: &mut dyn DocumentNode) -> Result<()> {
        self.read_into(root.child_mut(&self.name))
            .map_err(|e| e.within(&self.name))
    }

    fn unknown(&self, name: &str) -> ConfigError {
        ConfigError::UnknownName {
            name: name.to_string(),
            container: self.name.clone(),
        }
    }

    fn apply(&mut self, node: &dyn DocumentNode) -> Result<()> {
        for (name, group) in self.groups.iter_mut() {
            let child = node.descend(name)?;
            group
                .write_partial_from(child)
                .map_err(|e| e.within(name))?;
        }
        Ok(())
    }
}

fn group_type_mismatch<T>(name: &str) -> ConfigError {
    ConfigError::GroupTypeMismatch {
        name: name.to_string(),
        expected: std::any::type_name::<T>().to_string(),
    }
}

impl Group for Configuration {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_from(&mut self, node: &dyn DocumentNode) -> Result<()> {
        match self.mode {
            SyncMode::Partial => self.apply(node),
            SyncMode::Atomic => {
                let snapshot = self.groups.clone();
                let result = self.apply(node);
                if let Err(ref e) = result {
                    tracing::warn!(
                        "Synchronization of '{}' failed, restoring previous state: {}",
                        self.name,
                        e
                    );
                    self.groups = snapshot;
                }
                result
            }
        }
    }

    fn write_partial_from(&mut self, node: &dyn DocumentNode) -> Result<()> {
        self.apply(node)
    }

    fn read_into(&self, node: &mut dyn DocumentNode) -> Result<()> {
        for (name, group) in &self.groups {
            group
                .read_into(node.child_mut(name))
                .map_err(|e| e.within(name))?;
        }
        tracing::debug!("Stored {} group(s) of '{}'", self.groups.len(), self.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryNode;
    use crate::domain::{Property, PropertyGroup, Value};

    fn logging() -> PropertyGroup {
        PropertyGroup::new("logging")
            .with_property(
                Property::choice(
                    "level",
                    ["trace", "debug", "info", "warn", "err", "critical", "off"],
                )
                .unwrap(),
            )
            .unwrap()
            .with_property(Property::range("flushPeriodInSeconds", 0_i64, 9000).unwrap())
            .unwrap()
    }

    fn network() -> PropertyGroup {
        PropertyGroup::new("network")
            .with_property(Property::range("port", 1_i64, 65535).unwrap())
            .unwrap()
    }

    fn config() -> Configuration {
        let mut config = Configuration::new("myConfig");
        config.insert(logging()).unwrap();
        config
    }

    fn document(level: &str, period: i64) -> MemoryNode {
        MemoryNode::map([(
            "myConfig",
            MemoryNode::map([(
                "logging",
                MemoryNode::map([
                    ("level", MemoryNode::from(level)),
                    ("flushPeriodInSeconds", MemoryNode::from(period)),
                ]),
            )]),
        )])
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut config = config();
        config.insert(network()).unwrap();

        assert_eq!(config.len(), 2);
        assert!(config.contains("network"));
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["logging", "network"]);
        assert_eq!(config.get("logging").unwrap().name(), "logging");
        assert_eq!(config.groups().count(), 2);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut config = config();
        let err = config.insert(PropertyGroup::new("logging")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { ref name, ref container }
            if name == "logging" && container == "myConfig"));
        assert!(!config.insert_silent(PropertyGroup::new("logging")));

        // The original group is untouched.
        let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
        assert_eq!(logging.properties().len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut config = config();
        let removed = config.remove("logging").unwrap();
        assert_eq!(removed.name(), "logging");
        assert!(config.is_empty());

        assert!(matches!(
            config.remove("logging"),
            Err(ConfigError::UnknownName { .. })
        ));
        assert!(config.remove_silent("logging").is_none());
    }

    #[test]
    fn test_unknown_lookups() {
        let mut config = config();
        assert!(matches!(config.get("net"), Err(ConfigError::UnknownName { .. })));
        assert!(matches!(config.get_mut("net"), Err(ConfigError::UnknownName { .. })));
        assert!(config.get_silent("net").is_none());
        assert!(config.get_mut_silent("net").is_none());
        assert!(matches!(
            config.get_typed::<PropertyGroup>("net"),
            Err(ConfigError::UnknownName { .. })
        ));
        assert!(config.get_typed_silent::<PropertyGroup>("net").is_none());
    }

    #[test]
    fn test_get_typed_wrong_type() {
        let mut config = config();
        let err = config.get_typed::<Configuration>("logging").unwrap_err();
        assert!(err.to_string().contains("Unable to get group 'logging' in the specified type"));
        assert!(config.get_typed_silent::<Configuration>("logging").is_none());
        assert!(config.get_typed_mut_silent::<Configuration>("logging").is_none());
        assert!(matches!(
            config.get_typed_mut::<Configuration>("logging"),
            Err(ConfigError::GroupTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_get_typed_mut() {
        let mut config = config();
        config
            .get_typed_mut::<PropertyGroup>("logging")
            .unwrap()
            .set("level", "warn")
            .unwrap();
        let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
        assert_eq!(logging.get::<String>("level").unwrap(), "warn");
    }

    #[test]
    fn test_write_from_document() {
        let mut config = config();
        config.write_from_document(&document("info", 60)).unwrap();

        let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
        assert_eq!(logging.get::<String>("level").unwrap(), "info");
        assert_eq!(logging.get::<i64>("flushPeriodInSeconds").unwrap(), 60);
    }

    #[test]
    fn test_write_from_document_missing_root() {
        let mut config = config();
        let err = config.write_from_document(&MemoryNode::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue { ref path } if path == "myConfig"));
    }

    #[test]
    fn test_write_from_document_missing_group() {
        let mut config = config();
        let root = MemoryNode::map([("myConfig", MemoryNode::map([("other", MemoryNode::from(1_i64))]))]);
        let err = config.write_from_document(&root).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue { ref path } if path == "myConfig.logging"));
    }

    #[test]
    fn test_write_from_document_reports_full_path() {
        let mut config = config();
        let mut root = document("info", 60);
        root.child_mut("myConfig")
            .child_mut("logging")
            .child_mut("level")
            .set_integer(3)
            .unwrap();

        let err = config.write_from_document(&root).unwrap_err();
        assert!(matches!(err, ConfigError::DocumentError { ref path, .. }
            if path == "myConfig.logging.level"));
    }

    #[test]
    fn test_atomic_write_restores_all_groups() {
        let mut config = config();
        config.insert(network()).unwrap();
        config
            .get_typed_mut::<PropertyGroup>("logging")
            .unwrap()
            .set("level", "debug")
            .unwrap();

        // "logging" is applied first and succeeds, "network" then fails.
        let mut root = document("warn", 10);
        root.child_mut("myConfig")
            .child_mut("network")
            .child_mut("port")
            .set_integer(0)
            .unwrap();

        let err = config.write_from_document(&root).unwrap_err();
        assert!(matches!(err, ConfigError::ConstraintViolation { .. }));

        let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
        assert_eq!(logging.get::<String>("level").unwrap(), "debug");
    }

    #[test]
    fn test_partial_write_keeps_earlier_groups() {
        let mut config = config().with_sync_mode(SyncMode::Partial);
        assert_eq!(config.sync_mode(), SyncMode::Partial);
        config.insert(network()).unwrap();
        config
            .get_typed_mut::<PropertyGroup>("network")
            .unwrap()
            .set("port", 80)
            .unwrap();

        let mut root = document("warn", 10);
        root.child_mut("myConfig")
            .child_mut("network")
            .child_mut("port")
            .set_integer(70000)
            .unwrap();

        assert!(config.write_from_document(&root).is_err());

        let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
        assert_eq!(logging.get::<String>("level").unwrap(), "warn");
        let port = config
            .get_typed::<PropertyGroup>("network")
            .unwrap()
            .property("port")
            .unwrap();
        assert_eq!(port.value(), &Value::Integer(70000));
        assert!(!port.is_valid());
    }

    #[test]
    fn test_partial_write_keeps_earlier_properties() {
        let mut config = config().with_sync_mode(SyncMode::Partial);

        let err = config.write_from_document(&document("info", -1)).unwrap_err();
        assert!(matches!(err, ConfigError::ConstraintViolation { ref property, .. }
            if property == "flushPeriodInSeconds"));

        let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
        assert_eq!(logging.get::<String>("level").unwrap(), "info");
        assert_eq!(
            logging.property("flushPeriodInSeconds").unwrap().value(),
            &Value::Integer(-1)
        );
    }

    #[test]
    fn test_partial_mode_reaches_nested_groups() {
        let mut inner = Configuration::new("inner");
        inner.insert(logging()).unwrap();
        let mut outer = Configuration::new("outer").with_sync_mode(SyncMode::Partial);
        outer.insert(inner).unwrap();

        let root = MemoryNode::map([(
            "outer",
            MemoryNode::map([("inner", document("debug", 9001).at("myConfig").cloned().unwrap())]),
        )]);
        assert!(outer.write_from_document(&root).is_err());

        let logging = outer
            .get_typed::<Configuration>("inner")
            .unwrap()
            .get_typed::<PropertyGroup>("logging")
            .unwrap();
        assert_eq!(logging.get::<String>("level").unwrap(), "debug");
    }

    #[test]
    fn test_atomic_write_restores_earlier_properties() {
        let mut config = config();
        config.write_from_document(&document("err", 5)).unwrap();

        assert!(config.write_from_document(&document("info", -1)).is_err());
        let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
        assert_eq!(logging.get::<String>("level").unwrap(), "err");
        assert_eq!(logging.get::<i64>("flushPeriodInSeconds").unwrap(), 5);
    }

    #[test]
    fn test_read_into_document_creates_nodes() {
        let mut config = config();
        config.write_from_document(&document("err", 5)).unwrap();

        let mut root = MemoryNode::new();
        config.read_into_document(&mut root).unwrap();
        assert_eq!(root, document("err", 5));
    }

    #[test]
    fn test_nested_configuration() {
        let mut inner = Configuration::new("inner");
        inner.insert(logging()).unwrap();
        let mut outer = Configuration::new("outer");
        outer.insert(inner).unwrap();

        let root = MemoryNode::map([(
            "outer",
            MemoryNode::map([(
                "inner",
                MemoryNode::map([(
                    "logging",
                    MemoryNode::map([("level", MemoryNode::from("off"))]),
                )]),
            )]),
        )]);

        let err = outer.write_from_document(&root).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue { ref path }
            if path == "outer.inner.logging.flushPeriodInSeconds"));
    }
}
