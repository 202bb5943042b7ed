// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for synchronizing configurations with documents and files.

#![cfg(all(feature = "json", feature = "yaml"))]

mod common;

use common::{init_tracing, logging_group, my_config, network_group};
use safecfg::adapters::{load_document, save_document, JsonFormat, MemoryNode, YamlFormat};
use safecfg::domain::{ConfigError, Configuration, Group, Property, PropertyGroup, SyncMode, Value};
use safecfg::ports::{DocumentFormat, DocumentNode};
use std::io::Write;
use tempfile::NamedTempFile;

const VALID_YAML: &str = r#"
myConfig:
  logging:
    level: warn
    flushPeriodInSeconds: 120
"#;

fn temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn app_config(mode: SyncMode) -> Configuration {
    let mut config = Configuration::new("app").with_sync_mode(mode);
    config.insert(logging_group()).unwrap();
    config.insert(network_group()).unwrap();
    config
}

#[test]
fn test_load_yaml_file() {
    init_tracing();
    let file = temp_file(VALID_YAML, ".yaml");
    let document = load_document(&YamlFormat::new(), file.path()).unwrap();

    let mut config = my_config();
    config.write_from_document(&document).unwrap();

    let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
    assert_eq!(logging.get::<String>("level").unwrap(), "warn");
    assert_eq!(logging.get::<i64>("flushPeriodInSeconds").unwrap(), 120);
}

#[test]
fn test_save_then_load_json_file() {
    let mut config = my_config();
    config
        .get_typed_mut::<PropertyGroup>("logging")
        .unwrap()
        .set("level", "debug")
        .unwrap();

    let mut document = serde_json::Value::Null;
    config.read_into_document(&mut document).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf").join("app.json");
    save_document(&JsonFormat::new(), &document, &path).unwrap();

    let loaded = load_document(&JsonFormat::new(), &path).unwrap();
    assert_eq!(loaded, document);

    let mut copy = my_config();
    copy.write_from_document(&loaded).unwrap();
    assert_eq!(
        copy.get_typed::<PropertyGroup>("logging")
            .unwrap()
            .get::<String>("level")
            .unwrap(),
        "debug"
    );
}

#[test]
fn test_invalid_yaml_file() {
    let file = temp_file("myConfig: [unclosed", ".yaml");
    assert!(matches!(
        load_document(&YamlFormat::new(), file.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_yaml_and_json_agree() {
    let yaml = YamlFormat::new().parse(VALID_YAML).unwrap();
    let json = JsonFormat::new()
        .parse(r#"{"myConfig":{"logging":{"level":"warn","flushPeriodInSeconds":120}}}"#)
        .unwrap();

    let mut from_yaml = my_config();
    from_yaml.write_from_document(&yaml).unwrap();
    let mut from_json = my_config();
    from_json.write_from_document(&json).unwrap();

    let mut a = MemoryNode::new();
    let mut b = MemoryNode::new();
    from_yaml.read_into_document(&mut a).unwrap();
    from_json.read_into_document(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_real_property_accepts_integer_document() {
    let mut config = app_config(SyncMode::Atomic);
    let document = serde_json::json!({
        "app": {
            "logging": { "level": "info", "flushPeriodInSeconds": 1 },
            "network": { "port": 443, "loadRatio": 1 }
        }
    });
    config.write_from_document(&document).unwrap();

    let network = config.get_typed::<PropertyGroup>("network").unwrap();
    assert_eq!(network.get::<f64>("loadRatio").unwrap(), 1.0);
}

#[test]
fn test_atomic_mode_restores_every_group() {
    let mut config = app_config(SyncMode::Atomic);
    let document = serde_json::json!({
        "app": {
            "logging": { "level": "info", "flushPeriodInSeconds": 1 },
            "network": { "port": 0, "loadRatio": 0.5 }
        }
    });

    assert!(config.write_from_document(&document).is_err());
    let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
    assert!(logging.get::<String>("level").is_err());
    assert_eq!(logging.get::<i64>("flushPeriodInSeconds").unwrap(), 0);
}

#[test]
fn test_partial_mode_keeps_earlier_groups() {
    let mut config = app_config(SyncMode::Partial);
    let document = serde_json::json!({
        "app": {
            "logging": { "level": "info", "flushPeriodInSeconds": 1 },
            "network": { "port": 0, "loadRatio": 0.5 }
        }
    });

    assert!(config.write_from_document(&document).is_err());
    let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
    assert_eq!(logging.get::<String>("level").unwrap(), "info");
    assert_eq!(logging.get::<i64>("flushPeriodInSeconds").unwrap(), 1);
}

#[test]
fn test_partial_mode_keeps_rejected_property_value() {
    let mut config = my_config().with_sync_mode(SyncMode::Partial);
    let document = serde_json::json!({
        "myConfig": { "logging": { "level": "info", "flushPeriodInSeconds": -1 } }
    });

    assert!(config.write_from_document(&document).is_err());
    let logging = config.get_typed::<PropertyGroup>("logging").unwrap();
    assert_eq!(logging.get::<String>("level").unwrap(), "info");
    assert_eq!(
        logging.property("flushPeriodInSeconds").unwrap().value(),
        &Value::Integer(-1)
    );
}

fn limits_config() -> Configuration {
    let mut limits = PropertyGroup::new("limits")
        .with_property(Property::range("ceiling", 0.0, f64::INFINITY).unwrap())
        .unwrap();
    limits.set("ceiling", f64::INFINITY).unwrap();

    let mut config = Configuration::new("c");
    config.insert(limits).unwrap();
    config
}

#[test]
fn test_infinite_real_round_trips_through_yaml() {
    let config = limits_config();
    let mut document = serde_yaml::Value::Null;
    config.read_into_document(&mut document).unwrap();

    let rendered = YamlFormat::new().render(&document).unwrap();
    let reparsed = YamlFormat::new().parse(&rendered).unwrap();

    let mut copy = limits_config();
    copy.get_typed_mut::<PropertyGroup>("limits")
        .unwrap()
        .set("ceiling", 0.0)
        .unwrap();
    copy.write_from_document(&reparsed).unwrap();
    assert_eq!(
        copy.get_typed::<PropertyGroup>("limits")
            .unwrap()
            .get::<f64>("ceiling")
            .unwrap(),
        f64::INFINITY
    );
}

#[test]
fn test_infinite_real_is_rejected_by_json() {
    let config = limits_config();
    let mut document = serde_json::Value::Null;

    let err = config.read_into_document(&mut document).unwrap_err();
    assert!(matches!(err, ConfigError::DocumentError { ref path, .. } if path == "c.limits.ceiling"));
    assert!(document["c"]["limits"]["ceiling"].is_null());
}

#[test]
fn test_nested_configurations() {
    let mut services = Configuration::new("services");
    services.insert(network_group()).unwrap();

    let mut root = my_config();
    root.insert(services).unwrap();

    let document = serde_json::json!({
        "myConfig": {
            "logging": { "level": "off", "flushPeriodInSeconds": 0 },
            "services": { "network": { "port": 8080, "loadRatio": 0.25 } }
        }
    });
    root.write_from_document(&document).unwrap();

    let network = root
        .get_typed::<Configuration>("services")
        .unwrap()
        .get_typed::<PropertyGroup>("network")
        .unwrap();
    assert_eq!(network.get::<i64>("port").unwrap(), 8080);

    let mut output = serde_json::Value::Null;
    root.read_into_document(&mut output).unwrap();
    assert_eq!(output, document);
}

#[test]
fn test_nested_error_path() {
    let mut services = Configuration::new("services");
    services.insert(network_group()).unwrap();
    let mut root = my_config();
    root.insert(services).unwrap();

    let document = serde_json::json!({
        "myConfig": {
            "logging": { "level": "off", "flushPeriodInSeconds": 0 },
            "services": { "network": { "port": 8080 } }
        }
    });
    let err = root.write_from_document(&document).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyValue { ref path }
        if path == "myConfig.services.network.loadRatio"));
}

#[test]
fn test_configuration_writes_own_node() {
    let mut config = my_config();
    let node = MemoryNode::map([(
        "logging",
        MemoryNode::map([
            ("level", MemoryNode::from("trace")),
            ("flushPeriodInSeconds", MemoryNode::from(7_i64)),
        ]),
    )]);
    config.write_from(&node).unwrap();

    let mut out = MemoryNode::new();
    config.read_into(&mut out).unwrap();
    assert_eq!(out, node);
    assert_eq!(
        out.at("logging.level").map(|n| n.as_text().unwrap()),
        Some("trace".to_string())
    );
}
