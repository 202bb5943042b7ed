// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) through which the domain
//! reaches external documents. These traits are implemented by adapters in the
//! adapters layer.

pub mod document;
pub mod format;

// Re-export commonly used types
pub use document::DocumentNode;
pub use format::DocumentFormat;
