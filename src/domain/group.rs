// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named, serializable configuration nodes.
//!
//! A [`Group`] owns a slice of the configuration and knows how to move it to and from
//! its own document node. Leaf groups map their properties to keys of that node;
//! [`Configuration`](crate::domain::Configuration) is the composite group mapping
//! each child group to a key.

use crate::domain::Result;
use crate::ports::DocumentNode;
use std::any::Any;
use std::fmt;

/// Object-safe helpers every [`Group`] gets for free.
///
/// This trait is blanket-implemented for every `Group + Clone`, so implementors never
/// write it by hand. It lets a configuration snapshot its children and look them up
/// by concrete type.
pub trait GroupBase {
    /// Clones this group into a new box.
    fn clone_box(&self) -> Box<dyn Group>;

    /// Returns this group as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns this group as `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> GroupBase for T
where
    T: Group + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Group> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A named node of the configuration tree.
///
/// Both operations receive the document node that belongs to this group (the node
/// stored under the group's name in its parent). Errors carrying a document path
/// report it relative to that node; the enclosing configuration adds the group name.
///
/// # Examples
///
/// ```rust
/// use safecfg::domain::{Group, Property, Result};
/// use safecfg::ports::DocumentNode;
///
/// #[derive(Clone, Debug)]
/// struct Network {
///     port: Property,
/// }
///
/// impl Group for Network {
///     fn name(&self) -> &str {
///         "network"
///     }
///
///     fn write_from(&mut self, node: &dyn DocumentNode) -> Result<()> {
///         let port = node.descend("port")?.as_integer().map_err(|e| e.within("port"))?;
///         self.port.set_value(port)
///     }
///
///     fn read_into(&self, node: &mut dyn DocumentNode) -> Result<()> {
///         node.child_mut("port").set_integer(self.port.get_value::<i64>()?)
///     }
/// }
/// ```
pub trait Group: GroupBase + fmt::Debug + Send + Sync {
    /// Returns the group name, which is also its key in the parent document node.
    fn name(&self) -> &str;

    /// Updates this group from its document node.
    fn write_from(&mut self, node: &dyn DocumentNode) -> Result<()>;

    /// Updates this group from its document node without undoing earlier writes when
    /// a later one fails.
    ///
    /// A [`Configuration`](crate::domain::Configuration) in
    /// [`SyncMode::Partial`](crate::domain::SyncMode::Partial) drives its children
    /// through this method. Groups whose [`Group::write_from`] restores a snapshot on
    /// failure override it to skip the restore; the default forwards to
    /// [`Group::write_from`].
    fn write_partial_from(&mut self, node: &dyn DocumentNode) -> Result<()> {
        self.write_from(node)
    }

    /// Stores this group into its document node, creating missing children.
    fn read_into(&self, node: &mut dyn DocumentNode) -> Result<()>;
}

impl Clone for Box<dyn Group> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}
