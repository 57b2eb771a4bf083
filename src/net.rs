//! src/net.rs
//!
//! Transport side of the dashboard.

pub mod source;

pub use source::{HttpSource, MetricsSource};
