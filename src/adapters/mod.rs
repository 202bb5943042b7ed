// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing document implementations.
//!
//! This module contains concrete implementations of the document traits defined in
//! the ports layer: an in-memory tree, JSON and YAML values, and file loading for any
//! of them.

pub mod file;
pub mod memory;

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use file::{default_location, load_document, save_document};
pub use memory::MemoryNode;

// Re-export adapters based on feature flags
#[cfg(feature = "json")]
pub use json::JsonFormat;
#[cfg(feature = "yaml")]
pub use yaml::YamlFormat;
