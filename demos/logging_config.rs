// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging configuration example.
//!
//! This example demonstrates:
//! - Writing a custom group with typed accessors
//! - Lazy validation of properties and replaced constraints
//! - Loading a configuration from JSON and storing it back
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run --example logging_config
//! ```

use safecfg::prelude::*;
use serde_json::json;

const LEVELS: [&str; 7] = ["trace", "debug", "info", "warn", "err", "critical", "off"];

/// The logging section of the application configuration.
#[derive(Clone, Debug)]
struct Logging {
    level: Property,
    period: Property,
}

impl Logging {
    fn new() -> Result<Self> {
        Ok(Self {
            level: Property::choice("level", LEVELS)?,
            period: Property::range("flushPeriodInSeconds", 0_i64, 9000)?,
        })
    }

    fn level(&self) -> Result<String> {
        self.level.get_value()
    }

    fn set_level(&mut self, level: &str) -> Result<()> {
        self.level.set_value(level)
    }

    fn flush_period(&self) -> Result<i64> {
        self.period.get_value()
    }

    fn set_level_choices(&mut self, choices: &[&str]) -> Result<()> {
        self.level
            .set_constraint(Constraint::choice(choices.iter().copied())?)
    }
}

impl Group for Logging {
    fn name(&self) -> &str {
        "logging"
    }

    fn write_from(&mut self, node: &dyn DocumentNode) -> Result<()> {
        let level = node
            .descend("level")?
            .as_text()
            .map_err(|e| e.within("level"))?;
        let period = node
            .descend("flushPeriodInSeconds")?
            .as_integer()
            .map_err(|e| e.within("flushPeriodInSeconds"))?;
        self.level.set_value(level)?;
        self.period.set_value(period)
    }

    fn read_into(&self, node: &mut dyn DocumentNode) -> Result<()> {
        node.child_mut("level").set_text(&self.level()?)?;
        node.child_mut("flushPeriodInSeconds")
            .set_integer(self.flush_period()?)
    }
}

fn report<T: std::fmt::Debug>(label: &str, result: Result<T>) {
    match result {
        Ok(value) => println!("✓ {}: {:?}", label, value),
        Err(e) => println!("✗ {}: {}", label, e),
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== safecfg: Logging Configuration ===\n");

    let mut config = Configuration::new("myConfig");
    config.insert(Logging::new()?)?;

    println!("--- Example 1: Typed Access ---");
    let logging = config.get_typed_mut::<Logging>("logging")?;
    report("Default level", logging.level());
    report("Set level 'verbose'", logging.set_level("verbose"));
    report("Read level after invalid write", logging.level());
    report("Set level 'info'", logging.set_level("info"));
    report("Read level", logging.level());

    println!("\n--- Example 2: Replacing Constraints ---");
    report(
        "Restrict choices to debug/err",
        logging.set_level_choices(&["debug", "err"]),
    );
    report("Read level after restriction", logging.level());
    report("Set level 'err'", logging.set_level("err"));

    println!("\n--- Example 3: JSON Synchronization ---");
    let mut input = json!({ "myConfig": { "logging": { "level": "infooo" } } });
    report("Load without a flush period", config.write_from_document(&input));

    input["myConfig"]["logging"]["flushPeriodInSeconds"] = json!(-1);
    report("Load with an invalid level", config.write_from_document(&input));

    input["myConfig"]["logging"]["level"] = json!("debug");
    report("Load with an invalid period", config.write_from_document(&input));

    input["myConfig"]["logging"]["flushPeriodInSeconds"] = json!(3);
    report("Load a valid document", config.write_from_document(&input));

    let mut output = serde_json::Value::Null;
    config.read_into_document(&mut output)?;
    println!("\nStored configuration:\n{}", JsonFormat::new().render(&output)?);

    Ok(())
}
