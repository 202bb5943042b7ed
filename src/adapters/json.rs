// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON document adapter.
//!
//! This module implements [`DocumentNode`] for `serde_json::Value` and provides
//! [`JsonFormat`] for parsing and rendering JSON text.

use crate::domain::{ConfigError, Result};
use crate::ports::{DocumentFormat, DocumentNode};
use serde_json::{Map, Value as JsonValue};

fn describe(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(n) if n.is_f64() => "a real number",
        JsonValue::Number(_) => "an integer",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

fn mismatch(value: &JsonValue, expected: &str) -> ConfigError {
    ConfigError::document("", format!("expected {}, found {}", expected, describe(value)))
}

/// `null` counts as empty. Integers are accepted where a real is expected; nothing
/// else is coerced. Non-finite reals have no JSON representation and are rejected.
impl DocumentNode for JsonValue {
    fn is_empty(&self) -> bool {
        self.is_null()
    }

    fn child(&self, key: &str) -> Option<&dyn DocumentNode> {
        self.as_object()
            .and_then(|map| map.get(key))
            .map(|c| c as &dyn DocumentNode)
    }

    fn child_mut(&mut self, key: &str) -> &mut dyn DocumentNode {
        if !self.is_object() {
            *self = JsonValue::Object(Map::new());
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
        *self = JsonValue::from(value);
        Ok(())
    }

    fn set_real(&mut self, value: f64) -> Result<()> {
        let number = serde_json::Number::from_f64(value).ok_or_else(|| {
            ConfigError::document("", format!("{} has no JSON representation", value))
        })?;
        *self = JsonValue::Number(number);
        Ok(())
    }

    fn set_text(&mut self, value: &str) -> Result<()> {
        *self = JsonValue::from(value);
        Ok(())
    }
}

/// JSON format implementation.
///
/// # Examples
///
/// ```rust
/// use safecfg::adapters::JsonFormat;
/// use safecfg::ports::{DocumentFormat, DocumentNode};
///
/// let format = JsonFormat::new();
/// let document = format.parse(r#"{"app": {"port": 8080}}"#).unwrap();
/// let port = document.descend("app").unwrap().descend("port").unwrap();
/// assert_eq!(port.as_integer().unwrap(), 8080);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    /// Creates a JSON format rendering pretty-printed output.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Sets whether rendered output is pretty-printed.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }
}

impl DocumentFormat for JsonFormat {
    type Document = JsonValue;

    fn parse(&self, content: &str) -> Result<JsonValue> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn render(&self, document: &JsonValue) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        };
        rendered.map_err(|e| ConfigError::ParseError {
            message: format!("Failed to render JSON: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_empty() {
        assert!(JsonValue::Null.is_empty());
        assert!(!json!(0).is_empty());
        assert!(!json!("").is_empty());
    }

    #[test]
    fn test_child_lookup() {
        let document = json!({"myConfig": {"logging": {"level": "info"}}});
        let level = document
            .descend("myConfig")
            .and_then(|c| c.descend("logging"))
            .and_then(|g| g.descend("level"))
            .unwrap();
        assert_eq!(level.as_text().unwrap(), "info");
        assert!(document.child("other").is_none());
        assert!(json!(5).child("x").is_none());
    }

    #[test]
    fn test_explicit_null_child_is_empty() {
        let document = json!({"level": null});
        assert!(document.child("level").is_some());
        assert!(matches!(
            document.descend("level").err(),
            Some(ConfigError::EmptyValue { .. })
        ));
    }

    #[test]
    fn test_child_mut_creates_objects() {
        let mut document = JsonValue::Null;
        document.child_mut("a").child_mut("b").set_integer(7).unwrap();
        assert_eq!(document, json!({"a": {"b": 7}}));
    }

    #[test]
    fn test_child_mut_replaces_scalar() {
        let mut document = json!("scalar");
        document.child_mut("a").set_text("x").unwrap();
        assert_eq!(document, json!({"a": "x"}));
    }

    #[test]
    fn test_typed_conversions() {
        assert_eq!(json!(42).as_integer().unwrap(), 42);
        assert_eq!(json!(0.5).as_real().unwrap(), 0.5);
        assert_eq!(json!(60).as_real().unwrap(), 60.0);
        assert_eq!(json!("s").as_text().unwrap(), "s");

        let err = json!("42").as_integer().unwrap_err();
        assert!(err.to_string().contains("expected an integer, found a string"));
        assert!(json!(1.5).as_integer().is_err());
        assert!(json!(1).as_text().is_err());
    }

    #[test]
    fn test_setters() {
        let mut node = JsonValue::Null;
        node.set_real(2.5).unwrap();
        assert_eq!(node, json!(2.5));
        node.set_text("t").unwrap();
        assert_eq!(node, json!("t"));
        node.set_integer(-1).unwrap();
        assert_eq!(node, json!(-1));
    }

    #[test]
    fn test_non_finite_real_is_rejected() {
        let mut node = json!(1);
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = node.set_real(value).unwrap_err();
            assert!(matches!(err, ConfigError::DocumentError { .. }));
            assert_eq!(node, json!(1));
        }
    }

    #[test]
    fn test_format_round_trip() {
        let format = JsonFormat::new().pretty(false);
        let document = format.parse(r#"{"a":{"b":1}}"#).unwrap();
        assert_eq!(format.render(&document).unwrap(), r#"{"a":{"b":1}}"#);
        assert!(format.supports_extension("json"));
    }

    #[test]
    fn test_format_parse_error() {
        let err = JsonFormat::new().parse("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
