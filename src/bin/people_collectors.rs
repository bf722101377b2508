//! Prints the Group, Partition, Join and Collector demonstrations.
//!
//! Run with: cargo run
//! Diagnostics go to stderr; tune them with RUST_LOG and pick the
//! evaluation strategy with PEOPLE_COLLECTORS_STRATEGY.

use colored::Colorize;
use tracing::warn;

use people_collectors::{demo, report, roster, telemetry, DemoConfig};

fn main() {
    if let Err(err) = telemetry::init_tracing() {
        eprintln!("{}", err);
    }

    let config = DemoConfig::from_env().unwrap_or_else(|err| {
        warn!(%err, "falling back to the default configuration");
        DemoConfig::default()
    });

    let people = roster();
    let results = demo::run(&people, config.strategy);

    for section in report::render(&results) {
        println!("{}", section.header().bold().cyan());
        for line in &section.lines {
            println!("{}", line);
        }
    }
}
