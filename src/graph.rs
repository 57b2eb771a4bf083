//! src/graph.rs
//!
//! Top-level `graph` module exposing configuration, series data, the series
//! store and the shared dashboard state.

pub mod config;
pub mod data;
pub mod shared;
pub mod store;

/// Re-exports
pub use config::MonitorConfig;
pub use data::{Series, TimePoint};
pub use store::{ChartOption, SeriesStore, should_reset};
