//! src/cli.rs
//!
//! Command-line flags, converted into a `MonitorConfig`.

use std::time::Duration;

use clap::Parser;

use crate::graph::MonitorConfig;
use crate::graph::config::{DEFAULT_ADDR, DEFAULT_CAPACITY, DEFAULT_INTERVAL_MS};

#[derive(Parser, Debug)]
#[command(
    name = "qps-monitor",
    about = "Live per-method QPS chart for a process exposing /stats",
    long_about = None
)]
pub struct Cli {
    /// Listen address of the observed process (host:port or base URL)
    #[arg(long, default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Points kept per series
    #[arg(long, default_value_t = DEFAULT_CAPACITY, value_parser = parse_capacity)]
    pub capacity: usize,
}

fn parse_capacity(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("capacity must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    pub fn into_config(self) -> MonitorConfig {
        MonitorConfig::new(
            self.addr,
            Duration::from_millis(self.interval_ms),
            self.capacity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_monitor_config() {
        let cli = Cli::try_parse_from(["qps-monitor"]).unwrap();
        assert_eq!(cli.into_config(), MonitorConfig::default());
    }

    #[test]
    fn explicit_values() {
        let cli = Cli::try_parse_from([
            "qps-monitor",
            "--addr",
            "10.1.1.1:7001",
            "--interval-ms",
            "250",
            "--capacity",
            "60",
        ])
        .unwrap();
        let cfg = cli.into_config();
        assert_eq!(cfg.stats_url(), "http://10.1.1.1:7001/stats");
        assert_eq!(cfg.interval, Duration::from_millis(250));
        assert_eq!(cfg.capacity, 60);
    }

    #[test]
    fn zero_capacity_and_interval_are_rejected() {
        assert!(Cli::try_parse_from(["qps-monitor", "--capacity", "0"]).is_err());
        assert!(Cli::try_parse_from(["qps-monitor", "--interval-ms", "0"]).is_err());
    }
}
