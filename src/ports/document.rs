// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document node trait definition.
//!
//! This module defines the `DocumentNode` trait, the port through which groups and
//! configurations read from and write to an externally owned, tree-shaped value store
//! (a JSON or YAML document, an in-memory tree, ...). The core never inspects concrete
//! document types; it only descends by key and converts leaves to and from the three
//! value kinds.

use crate::domain::{ConfigError, Result, Value, ValueKind};

/// A view of one node in a tree-shaped document.
///
/// A node may be empty (absent or holding nothing). Reading descends with
/// [`DocumentNode::child`], which never creates anything; writing descends with
/// [`DocumentNode::child_mut`], which creates the child if needed.
///
/// # Contract
///
/// After a successful `set_integer(v)` (or `set_real`, `set_text`) the node is no
/// longer empty and `as_integer()` (or `as_real`, `as_text`) returns `v`. A document
/// that cannot represent `v` fails with [`ConfigError::DocumentError`] and leaves the
/// node unchanged.
///
/// Errors returned by the typed readers carry a path relative to the node itself
/// (usually the empty path); callers prefix it while unwinding with
/// [`ConfigError::within`].
///
/// # Examples
///
/// ```rust
/// use safecfg::adapters::MemoryNode;
/// use safecfg::ports::DocumentNode;
///
/// let mut root = MemoryNode::new();
/// root.child_mut("logging").child_mut("level").set_text("info").unwrap();
///
/// let level = root.descend("logging").unwrap().descend("level").unwrap();
/// assert_eq!(level.as_text().unwrap(), "info");
/// assert!(root.descend("network").is_err());
/// ```
pub trait DocumentNode {
    /// Returns `true` if this node holds no value.
    fn is_empty(&self) -> bool;

    /// Returns the child stored under `key`, or `None` if there is none.
    fn child(&self, key: &str) -> Option<&dyn DocumentNode>;

    /// Returns the child stored under `key`, creating an empty one if needed.
    ///
    /// If this node currently holds a scalar, it is replaced by a mapping.
    fn child_mut(&mut self, key: &str) -> &mut dyn DocumentNode;

    /// Reads this node as an integer.
    fn as_integer(&self) -> Result<i64>;

    /// Reads this node as a real number.
    fn as_real(&self) -> Result<f64>;

    /// Reads this node as text.
    fn as_text(&self) -> Result<String>;

    /// Stores an integer in this node.
    fn set_integer(&mut self, value: i64) -> Result<()>;

    /// Stores a real number in this node.
    fn set_real(&mut self, value: f64) -> Result<()>;

    /// Stores text in this node.
    fn set_text(&mut self, value: &str) -> Result<()>;

    /// Returns the non-empty child stored under `key`.
    ///
    /// Fails with [`ConfigError::EmptyValue`] (path `key`) if the child is absent or
    /// empty.
    fn descend(&self, key: &str) -> Result<&dyn DocumentNode> {
        match self.child(key) {
            Some(child) if !child.is_empty() => Ok(child),
            _ => Err(ConfigError::empty_value(key)),
        }
    }

    /// Reads this node as a value of the given kind.
    fn read_value(&self, kind: ValueKind) -> Result<Value> {
        if self.is_empty() {
            return Err(ConfigError::empty_value(""));
        }
        Ok(match kind {
            ValueKind::Integer => Value::Integer(self.as_integer()?),
            ValueKind::Real => Value::Real(self.as_real()?),
            ValueKind::Text => Value::Text(self.as_text()?),
        })
    }

    /// Stores `value` in this node using the writer matching its kind.
    fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Integer(v) => self.set_integer(*v),
            Value::Real(v) => self.set_real(*v),
            Value::Text(v) => self.set_text(v),
        }
    }
}
