// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use safecfg::domain::{Configuration, Property, PropertyGroup};

/// The log levels accepted by the `logging` fixture.
#[allow(dead_code)]
pub const LEVELS: [&str; 7] = ["trace", "debug", "info", "warn", "err", "critical", "off"];

/// Builds the `logging` group: a `level` choice and a `flushPeriodInSeconds` range.
#[allow(dead_code)]
pub fn logging_group() -> PropertyGroup {
    PropertyGroup::new("logging")
        .with_property(Property::choice("level", LEVELS).unwrap())
        .unwrap()
        .with_property(Property::range("flushPeriodInSeconds", 0_i64, 9000).unwrap())
        .unwrap()
}

/// Builds the `network` group: a `port` range and a `ratio` real range.
#[allow(dead_code)]
pub fn network_group() -> PropertyGroup {
    PropertyGroup::new("network")
        .with_property(Property::range("port", 1_i64, 65535).unwrap())
        .unwrap()
        .with_property(Property::range("loadRatio", 0.0, 1.0).unwrap())
        .unwrap()
}

/// Builds `myConfig` holding the `logging` group.
#[allow(dead_code)]
pub fn my_config() -> Configuration {
    let mut config = Configuration::new("myConfig");
    config.insert(logging_group()).unwrap();
    config
}

/// Initializes a test subscriber so `tracing` output shows up with `--nocapture`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
