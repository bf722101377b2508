//! Grouping, partitioning, joining and custom collectors over a fixed
//! roster of five people.
//!
//! [`collector`] holds the generic supplier / accumulator / combiner /
//! finisher protocol, [`strategy`] drives it sequentially or in parallel,
//! and [`demo`] runs the four demonstrations that the binary prints.

pub mod collector;
pub mod config;
pub mod demo;
pub mod person;
pub mod report;
pub mod strategy;
pub mod telemetry;

pub use collector::{Collector, FnCollector, Partition};
pub use config::{ConfigError, DemoConfig};
pub use demo::DemoReport;
pub use person::{roster, Person};
pub use strategy::Strategy;
