//! src/graph/shared.rs
//!
//! Dashboard state shared between the poller thread (writer) and the UI loop
//! (reader). The poller publishes owned chart snapshots here; it never hands
//! out its own series store.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Local};

use super::store::ChartOption;
use crate::error::FetchError;
use crate::poller::{ChartSink, PollPath};

#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    /// Latest published chart. `None` until the first successful poll.
    pub chart: Option<ChartOption>,

    pub rebuilds: u64,
    pub appends: u64,
    pub failures: u64,

    /// Most recent failure, cleared by the next successful poll.
    pub last_error: Option<(DateTime<Local>, FetchError)>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Alias: Arc<RwLock<DashboardState>>
pub type SharedDashboard = Arc<RwLock<DashboardState>>;

impl ChartSink for SharedDashboard {
    fn publish(&self, chart: ChartOption, path: PollPath) {
        // a poisoned lock only means a render panicked mid-read; keep publishing
        let mut state = self.write().unwrap_or_else(|e| e.into_inner());
        match path {
            PollPath::Rebuilt => state.rebuilds += 1,
            PollPath::Appended => state.appends += 1,
        }
        state.chart = Some(chart);
        state.last_error = None;
    }

    fn report(&self, error: &FetchError) {
        let mut state = self.write().unwrap_or_else(|e| e.into_inner());
        state.failures += 1;
        state.last_error = Some((Local::now(), error.clone()));
    }
}
