//! src/graph/config.rs
//!
//! Dashboard configuration: where to poll, how often, and how many points
//! each series keeps.

use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Listen address of the observed process (`host:port`), or a full base URL.
    pub addr: String,

    /// Time between two polls.
    pub interval: Duration,

    /// Maximum number of points retained per series.
    pub capacity: usize,
}

impl MonitorConfig {
    pub fn new(addr: impl Into<String>, interval: Duration, capacity: usize) -> Self {
        Self {
            addr: addr.into(),
            interval,
            capacity: capacity.max(1),
        }
    }

    /// Full URL of the metrics endpoint.
    pub fn stats_url(&self) -> String {
        let base = self.addr.trim_end_matches('/');
        if base.contains("://") {
            format!("{}/stats", base)
        } else {
            format!("http://{}/stats", base)
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADDR,
            Duration::from_millis(DEFAULT_INTERVAL_MS),
            DEFAULT_CAPACITY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_address_gets_http_scheme() {
        let cfg = MonitorConfig::new("10.0.0.3:9000", Duration::from_secs(1), 20);
        assert_eq!(cfg.stats_url(), "http://10.0.0.3:9000/stats");
    }

    #[test]
    fn full_base_url_is_kept() {
        let cfg = MonitorConfig::new("https://box.local/", Duration::from_secs(1), 20);
        assert_eq!(cfg.stats_url(), "https://box.local/stats");
    }

    #[test]
    fn capacity_is_at_least_one() {
        let cfg = MonitorConfig::new("h:1", Duration::from_secs(1), 0);
        assert_eq!(cfg.capacity, 1);
    }

    #[test]
    fn defaults() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.interval, Duration::from_millis(1000));
        assert_eq!(cfg.capacity, 20);
        assert_eq!(cfg.stats_url(), "http://127.0.0.1:8080/stats");
    }
}
