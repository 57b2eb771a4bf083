//! src/sample.rs
//!
//! One normalized poll result, plus the wire schema of the `/stats` endpoint
//! it is decoded from.
//!
//! Accepted body:
//! ```text
//! { "id": 4242, "qps": 17, "method": { "Echo": 12, "Ping": 5 } }
//! ```
//! `id` and `qps` are required. `method` may be missing or `null`, which is
//! read as "no methods". Method entries keep the order in which they appear
//! in the document.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FetchError, FetchResult};

/// Name of the synthetic aggregate metric, always the first series.
pub const TOTAL_METRIC: &str = "Total";

/// Identifier of the observed process (its pid on the server side).
pub type ProcessId = i64;

/// Raw `/stats` body.
#[derive(Debug, Deserialize)]
struct StatsResponse {
    id: ProcessId,
    qps: f64,
    #[serde(default)]
    method: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub process_id: ProcessId,
    /// `Total` first, then one entry per method.
    pub metrics: Vec<Metric>,
}

impl Sample {
    /// Build a sample from the aggregate rate and the per-method rates.
    pub fn new<I, S>(process_id: ProcessId, total: f64, methods: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut metrics = vec![Metric {
            name: TOTAL_METRIC.to_string(),
            value: total,
        }];
        metrics.extend(methods.into_iter().map(|(name, value)| Metric {
            name: name.into(),
            value,
        }));
        Self {
            process_id,
            metrics,
        }
    }

    /// Decode and validate a `/stats` body.
    pub fn from_json(body: &str) -> FetchResult<Self> {
        let raw: StatsResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut methods = Vec::new();
        for (name, value) in raw.method.unwrap_or_default() {
            if name == TOTAL_METRIC {
                return Err(FetchError::Malformed(format!(
                    "method name `{}` is reserved",
                    TOTAL_METRIC
                )));
            }
            let Some(v) = value.as_f64() else {
                return Err(FetchError::Malformed(format!(
                    "method `{}` has non-numeric value {}",
                    name, value
                )));
            };
            methods.push((name, v));
        }

        Ok(Sample::new(raw.id, raw.qps, methods))
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_comes_first_then_methods_in_document_order() {
        let s = Sample::from_json(r#"{"id":7,"qps":10,"method":{"zeta":3,"alpha":7,"mid":0}}"#)
            .unwrap();
        assert_eq!(s.process_id, 7);
        let names: Vec<_> = s.names().collect();
        assert_eq!(names, vec!["Total", "zeta", "alpha", "mid"]);
        let values: Vec<_> = s.metrics.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![10.0, 3.0, 7.0, 0.0]);
    }

    #[test]
    fn missing_or_null_method_map_means_no_methods() {
        let a = Sample::from_json(r#"{"id":1,"qps":4}"#).unwrap();
        let b = Sample::from_json(r#"{"id":1,"qps":4,"method":null}"#).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn fractional_rates_are_accepted() {
        let s = Sample::from_json(r#"{"id":1,"qps":2.5,"method":{"a":2.5}}"#).unwrap();
        assert_eq!(s.metrics[1].value, 2.5);
    }

    #[test]
    fn missing_required_fields_are_malformed() {
        for body in [
            r#"{"qps":1,"method":{}}"#,
            r#"{"id":1,"method":{}}"#,
            r#"{"id":"seven","qps":1}"#,
        ] {
            assert!(
                matches!(Sample::from_json(body), Err(FetchError::Malformed(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = Sample::from_json("<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn non_numeric_method_value_is_malformed() {
        let err = Sample::from_json(r#"{"id":1,"qps":1,"method":{"a":"fast"}}"#).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(ref m) if m.contains("`a`")));
    }

    #[test]
    fn method_named_total_is_rejected() {
        let err = Sample::from_json(r#"{"id":1,"qps":1,"method":{"Total":1}}"#).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
