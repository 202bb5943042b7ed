// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML document adapter.
//!
//! This module implements [`DocumentNode`] for `serde_yaml::Value` and provides
//! [`YamlFormat`] for parsing and rendering YAML text.

use crate::domain::{ConfigError, Result};
use crate::ports::{DocumentFormat, DocumentNode};
use serde_yaml::{Mapping, Value as YamlValue};

fn describe(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(n) if n.is_f64() => "a real number",
        YamlValue::Number(_) => "an integer",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

fn mismatch(value: &YamlValue, expected: &str) -> ConfigError {
    ConfigError::document("", format!("expected {}, found {}", expected, describe(value)))
}

/// `null` (or `~`) counts as empty. Integers are accepted where a real is expected;
/// nothing else is coerced, so a quoted `"42"` is text, not an integer.
impl DocumentNode for YamlValue {
    fn is_empty(&self) -> bool {
        self.is_null()
    }

    fn child(&self, key: &str) -> Option<&dyn DocumentNode> {
        self.as_mapping()
            .and_then(|map| map.get(key))
            .map(|c| c as &dyn DocumentNode)
    }

    fn child_mut(&mut self, key: &str) -> &mut dyn DocumentNode {
        if !self.is_mapping() {
            *self = YamlValue::Mapping(Mapping::new());
        }
        &mut self[key]
    }

    fn as_integer(&self) -> Result<i64> {
        self.as_i64().ok_or_else(|| mismatch(self, "an integer"))
    }

    fn as_real(&self) -> Result<f64> {
        self.as_f64().ok_or_else(|| mismatch(self, "a real number"))
    }

    fn as_text(&self) -> Result<String> {
        self.as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch(self, "a string"))
    }

    fn set_integer(&mut self, value: i64) -> Result<()> {
        *self = YamlValue::Number(value.into());
        Ok(())
    }

    fn set_real(&mut self, value: f64) -> Result<()> {
        *self = YamlValue::Number(value.into());
        Ok(())
    }

    fn set_text(&mut self, value: &str) -> Result<()> {
        *self = YamlValue::String(value.to_string());
        Ok(())
    }
}

/// YAML format implementation.
///
/// # Examples
///
/// ```rust
/// use safecfg::adapters::YamlFormat;
/// use safecfg::ports::{DocumentFormat, DocumentNode};
///
/// let format = YamlFormat::new();
/// let document = format.parse("database:\n  host: localhost\n  port: 5432").unwrap();
/// let database = document.descend("database").unwrap();
/// assert_eq!(database.descend("host").unwrap().as_text().unwrap(), "localhost");
/// assert_eq!(database.descend("port").unwrap().as_integer().unwrap(), 5432);
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlFormat;

impl YamlFormat {
    /// Creates a new YAML format.
    pub fn new() -> Self {
        YamlFormat
    }
}

impl DocumentFormat for YamlFormat {
    type Document = YamlValue;

    fn parse(&self, content: &str) -> Result<YamlValue> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn render(&self, document: &YamlValue) -> Result<String> {
        serde_yaml::to_string(document).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to render YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
