//! src/poller.rs
//!
//! The polling control loop.
//!
//! Each tick goes `Idle -> Fetching -> Reconciling -> Idle`:
//! fetch a [`Sample`], decide between rebuilding and appending, then publish
//! an owned [`ChartOption`] to the [`ChartSink`]. A failed fetch leaves the
//! store untouched and is reported to the sink instead.
//!
//! The poller owns its [`SeriesStore`] and every method that touches it takes
//! `&mut self`, so fetch and reconciliation run strictly one after the other
//! on the poller thread. A tick that comes due while a fetch is still running
//! is skipped rather than queued.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::graph::{ChartOption, MonitorConfig, SeriesStore, should_reset};
use crate::net::MetricsSource;
use crate::sample::Sample;

/// Which reconciliation path a successful poll took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollPath {
    Rebuilt,
    Appended,
}

/// Rendering and error-reporting collaborator.
pub trait ChartSink {
    /// Called once per successful poll with the current chart.
    fn publish(&self, chart: ChartOption, path: PollPath);

    /// Called once per failed poll.
    fn report(&self, error: &FetchError);
}

pub struct Poller<S, K> {
    source: S,
    sink: K,
    store: Option<SeriesStore>,
    capacity: usize,
    interval: Duration,
}

impl<S: MetricsSource, K: ChartSink> Poller<S, K> {
    pub fn new(config: &MonitorConfig, source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            store: None,
            capacity: config.capacity.max(1),
            interval: config.interval.max(Duration::from_millis(1)),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> Option<&SeriesStore> {
        self.store.as_ref()
    }

    /// One full poll cycle; points are stamped when the sample arrives.
    pub fn tick(&mut self) -> FetchResult<PollPath> {
        self.tick_with(Local::now)
    }

    /// One full poll cycle stamped with `now`.
    #[cfg(test)]
    pub fn tick_at(&mut self, now: DateTime<Local>) -> FetchResult<PollPath> {
        self.tick_with(|| now)
    }

    /// `clock` is read only after a successful fetch.
    fn tick_with(&mut self, clock: impl FnOnce() -> DateTime<Local>) -> FetchResult<PollPath> {
        match self.source.fetch() {
            Ok(sample) => Ok(self.reconcile(&sample, clock())),
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "poll failed; keeping current series");
                self.sink.report(&e);
                Err(e)
            }
        }
    }

    /// Rebuild or append, then publish.
    fn reconcile(&mut self, sample: &Sample, now: DateTime<Local>) -> PollPath {
        let path = if should_reset(self.store.as_ref(), sample) {
            if let Some(old) = &self.store {
                info!(
                    old_pid = old.process_id(),
                    new_pid = sample.process_id,
                    old_series = old.series().len(),
                    new_series = sample.len(),
                    "schema changed; rebuilding chart"
                );
            } else {
                info!(pid = sample.process_id, series = sample.len(), "first sample; building chart");
            }
            self.store = Some(SeriesStore::rebuild(sample, self.capacity, now));
            PollPath::Rebuilt
        } else {
            if let Some(store) = self.store.as_mut() {
                store.append(sample, now);
            }
            debug!(pid = sample.process_id, "appended sample");
            PollPath::Appended
        };

        if let Some(store) = &self.store {
            self.sink.publish(store.to_chart(), path);
        }
        path
    }

    /// Tick on a fixed schedule until `stop` fires or its sender is dropped.
    pub fn run(&mut self, stop: &Receiver<()>) {
        let mut next = Instant::now();
        loop {
            let now = Instant::now();
            let signal = if next > now {
                match stop.recv_timeout(next - now) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
                    Err(RecvTimeoutError::Timeout) => false,
                }
            } else {
                matches!(stop.try_recv(), Ok(()) | Err(TryRecvError::Disconnected))
            };
            if signal {
                break;
            }

            // Err is already reported to the sink
            let _ = self.tick();

            next += self.interval;
            let now = Instant::now();
            while next <= now {
                debug!("poll overran its interval; skipping a tick");
                next += self.interval;
            }
        }
        info!("poller stopped");
    }
}

/// A poller running on its own thread.
pub struct PollerHandle {
    stop: Sender<()>,
    join: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the loop and wait for it; an in-flight fetch is allowed to finish.
    pub fn stop(self) {
        let _ = self.stop.send(());
        if self.join.join().is_err() {
            warn!("poller thread panicked");
        }
    }
}

/// Spawn the poll loop on a dedicated thread.
pub fn spawn<S, K>(config: &MonitorConfig, source: S, sink: K) -> PollerHandle
where
    S: MetricsSource + Send + 'static,
    K: ChartSink + Send + 'static,
{
    let (stop, stop_rx) = mpsc::channel();
    let mut poller = Poller::new(config, source, sink);
    let join = thread::spawn(move || poller.run(&stop_rx));
    PollerHandle { stop, join }
}
