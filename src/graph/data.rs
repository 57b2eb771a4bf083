//! src/graph/data.rs
//!
//! A single metric's bounded point history.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimePoint {
    pub timestamp: DateTime<Local>,
    pub value: f64,
}

impl TimePoint {
    pub fn new(timestamp: DateTime<Local>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Summary over the points currently held by a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub last: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,

    /// oldest at front
    points: VecDeque<TimePoint>,

    capacity: usize,
}

impl Series {
    /// New series seeded with its first point.
    pub fn new(name: impl Into<String>, capacity: usize, first: TimePoint) -> Self {
        let capacity = capacity.max(1);
        let mut points = VecDeque::with_capacity(capacity + 1);
        points.push_back(first);
        Self {
            name: name.into(),
            points,
            capacity,
        }
    }

    /// Append a point and evict the oldest one if the window overflowed.
    ///
    /// Maintains invariant: points.len() <= capacity. Returns the evicted point.
    pub fn push_point(&mut self, point: TimePoint) -> Option<TimePoint> {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &TimePoint> {
        self.points.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&TimePoint> {
        self.points.back()
    }

    /// (min, max, avg, last) over the held window; `None` when empty.
    pub fn stats(&self) -> Option<SeriesStats> {
        let last = self.points.back()?.value;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for p in &self.points {
            min = min.min(p.value);
            max = max.max(p.value);
            sum += p.value;
        }
        Some(SeriesStats {
            min,
            max,
            avg: sum / self.points.len() as f64,
            last,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, value: f64) -> TimePoint {
        TimePoint::new(Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap(), value)
    }

    #[test]
    fn push_below_capacity_keeps_everything() {
        let mut s = Series::new("Total", 3, at(0, 1.0));
        assert_eq!(s.push_point(at(1, 2.0)), None);
        assert_eq!(s.push_point(at(2, 3.0)), None);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn overflow_evicts_oldest_point() {
        let mut s = Series::new("Total", 2, at(0, 1.0));
        s.push_point(at(1, 2.0));
        let evicted = s.push_point(at(2, 3.0));
        assert_eq!(evicted, Some(at(0, 1.0)));
        let values: Vec<_> = s.points().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0, 3.0]);
    }

    #[test]
    fn zero_capacity_is_treated_as_one() {
        let mut s = Series::new("Total", 0, at(0, 1.0));
        s.push_point(at(1, 2.0));
        assert_eq!(s.capacity(), 1);
        assert_eq!(s.latest().map(|p| p.value), Some(2.0));
    }

    #[test]
    fn stats_cover_the_window_only() {
        let mut s = Series::new("Echo", 3, at(0, 100.0));
        for (i, v) in [2.0, 4.0, 9.0].into_iter().enumerate() {
            s.push_point(at(i as i64 + 1, v));
        }
        let st = s.stats().unwrap();
        assert_eq!(st.min, 2.0);
        assert_eq!(st.max, 9.0);
        assert_eq!(st.avg, 5.0);
        assert_eq!(st.last, 9.0);
    }
}
