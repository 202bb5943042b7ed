// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document adapter.
//!
//! This module provides [`MemoryNode`], a dependency-free document tree. It is handy
//! for tests and for hosts that assemble a document programmatically before handing
//! it to a configuration.

use crate::domain::{ConfigError, Result, Value};
use crate::ports::DocumentNode;
use std::collections::BTreeMap;

/// A node of an in-memory document tree.
///
/// A node is either empty, a scalar [`Value`], or a mapping of named children.
/// Reading a real from an integer scalar widens the integer; no other conversion is
/// performed.
///
/// # Examples
///
/// ```rust
/// use safecfg::adapters::MemoryNode;
/// use safecfg::ports::DocumentNode;
///
/// let mut root = MemoryNode::new();
/// root.child_mut("app").child_mut("port").set_integer(8080).unwrap();
///
/// assert_eq!(root.at("app.port").unwrap().as_integer().unwrap(), 8080);
/// assert!(root.at("app.host").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MemoryNode {
    /// A node holding nothing
    #[default]
    Empty,
    /// A leaf holding one value
    Scalar(Value),
    /// A mapping of named children
    Map(BTreeMap<String, MemoryNode>),
}

impl MemoryNode {
    /// Creates an empty node.
    pub fn new() -> Self {
        MemoryNode::Empty
    }

    /// Creates a mapping node from `(key, node)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, MemoryNode)>,
    {
        MemoryNode::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the node at a dotted path, e.g. `"myConfig.logging.level"`.
    pub fn at(&self, path: &str) -> Option<&MemoryNode> {
        path.split('.').try_fold(self, |node, key| match node {
            MemoryNode::Map(children) => children.get(key),
            _ => None,
        })
    }

    /// Returns the scalar held by this node, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            MemoryNode::Scalar(value) => Some(value),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            MemoryNode::Empty => "nothing".to_string(),
            MemoryNode::Scalar(value) => format!("{} {}", value.kind(), value),
            MemoryNode::Map(_) => "a mapping".to_string(),
        }
    }

    fn mismatch(&self, expected: &str) -> ConfigError {
        ConfigError::document("", format!("expected {}, found {}", expected, self.describe()))
    }
}

impl From<Value> for MemoryNode {
    fn from(value: Value) -> Self {
        MemoryNode::Scalar(value)
    }
}

impl From<i64> for MemoryNode {
    fn from(value: i64) -> Self {
        MemoryNode::Scalar(Value::Integer(value))
    }
}

impl From<f64> for MemoryNode {
    fn from(value: f64) -> Self {
        MemoryNode::Scalar(Value::Real(value))
    }
}

impl From<&str> for MemoryNode {
    fn from(value: &str) -> Self {
        MemoryNode::Scalar(Value::from(value))
    }
}

impl From<String> for MemoryNode {
    fn from(value: String) -> Self {
        MemoryNode::Scalar(Value::Text(value))
    }
}

impl DocumentNode for MemoryNode {
    fn is_empty(&self) -> bool {
        matches!(self, MemoryNode::Empty)
    }

    fn child(&self, key: &str) -> Option<&dyn DocumentNode> {
        match self {
            MemoryNode::Map(children) => children.get(key).map(|c| c as &dyn DocumentNode),
            _ => None,
        }
    }

    fn child_mut(&mut self, key: &str) -> &mut dyn DocumentNode {
        if !matches!(self, MemoryNode::Map(_)) {
            *self = MemoryNode::Map(BTreeMap::new());
        }
        match self {
            MemoryNode::Map(children) => children.entry(key.to_string()).or_default(),
            _ => unreachable!("node was just turned into a mapping"),
        }
    }

    fn as_integer(&self) -> Result<i64> {
        match self {
            MemoryNode::Scalar(Value::Integer(v)) => Ok(*v),
            other => Err(other.mismatch("an integer")),
        }
    }

    fn as_real(&self) -> Result<f64> {
        match self {
            MemoryNode::Scalar(Value::Real(v)) => Ok(*v),
            MemoryNode::Scalar(Value::Integer(v)) => Ok(*v as f64),
            other => Err(other.mismatch("a real number")),
        }
    }

    fn as_text(&self) -> Result<String> {
        match self {
            MemoryNode::Scalar(Value::Text(v)) => Ok(v.clone()),
            other => Err(other.mismatch("text")),
        }
    }

    fn set_integer(&mut self, value: i64) -> Result<()> {
        *self = MemoryNode::Scalar(Value::Integer(value));
        Ok(())
    }

    fn set_real(&mut self, value: f64) -> Result<()> {
        *self = MemoryNode::Scalar(Value::Real(value));
        Ok(())
    }

    fn set_text(&mut self, value: &str) -> Result<()> {
        *self = MemoryNode::Scalar(Value::Text(value.to_string()));
        Ok(())
    }
}
