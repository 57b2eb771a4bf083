//! src/graph/store.rs
//!
//! The chart's series set and the two ways it evolves between polls.
//!
//! # Cold path
//! When [`should_reset`] says the new sample no longer matches the store, the
//! store is thrown away and [`SeriesStore::rebuild`] makes a fresh one with a
//! single point per series. This is the only way the number or order of
//! series can change.
//!
//! # Warm path
//! Otherwise [`SeriesStore::append`] pushes one point onto every series and
//! evicts the oldest point of any series that went over capacity.
//!
//! Metrics are matched to series by position, not by name. A sample that
//! reorders its methods without changing their count is appended as-is;
//! the mismatch is only logged.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use tracing::warn;

use super::data::{Series, TimePoint};
use crate::sample::{ProcessId, Sample};

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStore {
    process_id: ProcessId,
    series: Vec<Series>,
    name_index: HashMap<String, usize>,
}

/// Whether `sample` can extend `previous` or requires a rebuild.
///
/// A reset is needed when there is no store yet, when the number of metrics
/// changed, or when the process identity changed.
pub fn should_reset(previous: Option<&SeriesStore>, sample: &Sample) -> bool {
    match previous {
        None => true,
        Some(store) => {
            sample.len() != store.series.len() || store.process_id != sample.process_id
        }
    }
}

impl SeriesStore {
    /// Fresh store with one series per metric, each seeded at `now`.
    pub fn rebuild(sample: &Sample, capacity: usize, now: DateTime<Local>) -> Self {
        let mut series = Vec::with_capacity(sample.len());
        let mut name_index = HashMap::with_capacity(sample.len());
        for (i, metric) in sample.metrics.iter().enumerate() {
            name_index.insert(metric.name.clone(), i);
            series.push(Series::new(
                metric.name.clone(),
                capacity,
                TimePoint::new(now, metric.value),
            ));
        }
        Self {
            process_id: sample.process_id,
            series,
            name_index,
        }
    }

    /// Append one point per series, positionally, evicting overflow.
    ///
    /// Callers must have checked [`should_reset`] first; a sample with a
    /// different metric count is ignored past the shorter of the two.
    pub fn append(&mut self, sample: &Sample, now: DateTime<Local>) {
        debug_assert_eq!(sample.len(), self.series.len());
        for (i, (series, metric)) in self.series.iter_mut().zip(&sample.metrics).enumerate() {
            if self.name_index.get(&metric.name) != Some(&i) {
                warn!(
                    series = %series.name,
                    metric = %metric.name,
                    "metric order drifted; appending by position"
                );
            }
            series.push_point(TimePoint::new(now, metric.value));
        }
    }

    pub fn process_id(&self) -> ProcessId {
        self.process_id
    }

    /// Label shown above the chart.
    pub fn title(&self) -> String {
        format!("PID-{}", self.process_id)
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.name_index.get(name).map(|&i| &self.series[i])
    }

    /// Owned snapshot for the rendering side.
    pub fn to_chart(&self) -> ChartOption {
        ChartOption {
            title: self.title(),
            legend: self.series.iter().map(|s| s.name.clone()).collect(),
            series: self.series.clone(),
        }
    }
}

/// What the renderer receives after every successful poll.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOption {
    pub title: String,
    pub legend: Vec<String>,
    pub series: Vec<Series>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
    }

    fn sample(id: ProcessId, total: f64, methods: &[(&str, f64)]) -> Sample {
        Sample::new(id, total, methods.iter().map(|&(n, v)| (n, v)))
    }

    fn values(s: &Series) -> Vec<f64> {
        s.points().map(|p| p.value).collect()
    }

    #[test]
    fn first_poll_always_resets() {
        assert!(should_reset(None, &sample(7, 1.0, &[])));
    }

    #[test]
    fn same_identity_and_count_never_resets() {
        let store = SeriesStore::rebuild(&sample(7, 1.0, &[("foo", 1.0)]), 20, t(0));
        assert!(!should_reset(Some(&store), &sample(7, 5.0, &[("foo", 9.0)])));
    }

    #[test]
    fn count_change_resets_both_ways() {
        let store = SeriesStore::rebuild(&sample(7, 1.0, &[("foo", 1.0)]), 20, t(0));
        assert!(should_reset(
            Some(&store),
            &sample(7, 1.0, &[("foo", 1.0), ("bar", 2.0)])
        ));
        assert!(should_reset(Some(&store), &sample(7, 1.0, &[])));
    }

    #[test]
    fn identity_change_resets_with_matching_count() {
        let store = SeriesStore::rebuild(&sample(7, 1.0, &[("foo", 1.0)]), 20, t(0));
        assert!(should_reset(Some(&store), &sample(9, 1.0, &[("foo", 1.0)])));
    }

    #[test]
    fn reorder_alone_does_not_reset() {
        let store = SeriesStore::rebuild(&sample(7, 0.0, &[("a", 1.0), ("b", 2.0)]), 20, t(0));
        assert!(!should_reset(
            Some(&store),
            &sample(7, 0.0, &[("b", 2.0), ("a", 1.0)])
        ));
    }

    #[test]
    fn rebuild_seeds_one_point_per_metric() {
        let store = SeriesStore::rebuild(&sample(7, 10.0, &[("foo", 3.0), ("bar", 7.0)]), 20, t(0));
        assert_eq!(store.title(), "PID-7");
        let names: Vec<_> = store.series().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Total", "foo", "bar"]);
        for (s, v) in store.series().iter().zip([10.0, 3.0, 7.0]) {
            assert_eq!(s.len(), 1);
            assert_eq!(s.latest(), Some(&TimePoint::new(t(0), v)));
        }
        assert_eq!(store.get("bar").map(values), Some(vec![7.0]));
        assert!(store.get("baz").is_none());
    }

    #[test]
    fn append_matches_by_position() {
        let mut store =
            SeriesStore::rebuild(&sample(7, 0.0, &[("a", 1.0), ("b", 2.0)]), 20, t(0));
        store.append(&sample(7, 0.0, &[("b", 20.0), ("a", 10.0)]), t(1));
        assert_eq!(store.get("a").map(values), Some(vec![1.0, 20.0]));
        assert_eq!(store.get("b").map(values), Some(vec![2.0, 10.0]));
    }

    #[test]
    fn window_keeps_most_recent_points() {
        let mut store = SeriesStore::rebuild(&sample(7, 1.0, &[]), 20, t(0));
        for v in 2..=25 {
            store.append(&sample(7, v as f64, &[]), t(v));
        }
        let total = &store.series()[0];
        assert_eq!(total.len(), 20);
        assert_eq!(values(total), (6..=25).map(|v| v as f64).collect::<Vec<_>>());
        assert_eq!(total.points().next().map(|p| p.timestamp), Some(t(6)));
    }

    #[test]
    fn chart_snapshot_is_detached_from_store() {
        let mut store = SeriesStore::rebuild(&sample(3, 1.0, &[("m", 2.0)]), 20, t(0));
        let chart = store.to_chart();
        store.append(&sample(3, 5.0, &[("m", 6.0)]), t(1));
        assert_eq!(chart.title, "PID-3");
        assert_eq!(chart.legend, vec!["Total".to_string(), "m".to_string()]);
        assert_eq!(chart.series[0].len(), 1);
        assert_eq!(store.series()[0].len(), 2);
    }
}
