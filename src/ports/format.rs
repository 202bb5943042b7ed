// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document format trait definition.
//!
//! This module defines the `DocumentFormat` trait, which turns text in a given format
//! (JSON, YAML, ...) into a document tree the configuration can be synchronized with,
//! and renders such a tree back into text.

use crate::domain::Result;
use crate::ports::DocumentNode;

/// A trait for parsing and rendering documents of one text format.
///
/// # Examples
///
/// ```rust
/// use safecfg::adapters::MemoryNode;
/// use safecfg::domain::Result;
/// use safecfg::ports::DocumentFormat;
///
/// struct EmptyFormat;
///
/// impl DocumentFormat for EmptyFormat {
///     type Document = MemoryNode;
///
///     fn parse(&self, _content: &str) -> Result<MemoryNode> {
///         Ok(MemoryNode::new())
///     }
///
///     fn render(&self, _document: &MemoryNode) -> Result<String> {
///         Ok(String::new())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["empty"]
///     }
/// }
///
/// assert!(EmptyFormat.parse("anything").is_ok());
/// ```
pub trait DocumentFormat {
    /// The document tree produced by this format.
    type Document: DocumentNode + Default;

    /// Parses `content` into a document tree.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The parsed document
    /// * `Err(ConfigError::ParseError)` - The content is not valid in this format
    fn parse(&self, content: &str) -> Result<Self::Document>;

    /// Renders a document tree back into text.
    fn render(&self, document: &Self::Document) -> Result<String>;

    /// Returns the file extensions (without the leading dot) handled by this format.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if `extension` is one of [`DocumentFormat::supported_extensions`].
    ///
    /// The comparison ignores ASCII case.
    fn supports_extension(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}
