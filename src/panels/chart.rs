//! src/panels/chart.rs
//!
//! Chart panel: every series on a shared time axis, y-axis in qps.
//!
//! The x-axis is seconds since the oldest held point, labelled with wall-clock
//! times. The y-axis starts at zero (or below, for negative data) and pads the
//! top by 10% so the highest point never sits on the border.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use chrono::{DateTime, Local};

use super::{Panel, series_color};
use crate::graph::ChartOption;

pub struct ChartPanel<'a> {
    pub chart: Option<&'a ChartOption>,
    pub focused: usize,
}

impl<'a> ChartPanel<'a> {
    pub fn new(chart: Option<&'a ChartOption>, focused: usize) -> Self {
        Self { chart, focused }
    }

    /// Oldest and newest timestamps across all series.
    fn time_span(chart: &ChartOption) -> Option<(DateTime<Local>, DateTime<Local>)> {
        let mut stamps = chart
            .series
            .iter()
            .flat_map(|s| s.points().map(|p| p.timestamp));
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// (ymin, ymax) for the given values: zero baseline, 10% headroom.
    ///
    /// Falls back to `(0.0, 1.0)` when there is nothing finite to show.
    fn compute_y_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let mut mn = 0.0_f64;
        let mut mx = f64::NEG_INFINITY;
        for v in values.filter(|v| v.is_finite()) {
            mn = mn.min(v);
            mx = mx.max(v);
        }
        if !mx.is_finite() || mx <= mn {
            // flat at the baseline: still show a visible band
            return (mn, mn + 1.0);
        }
        let pad = (mx - mn) * 0.1;
        (mn, mx + pad)
    }
}

impl Panel for ChartPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(chart) = self.chart else {
            let p = Paragraph::new("waiting for the first sample...")
                .block(Block::default().title("QPS").borders(Borders::ALL));
            f.render_widget(p, area);
            return;
        };
        let Some((origin, latest)) = ChartPanel::time_span(chart) else {
            return;
        };

        // Keep point vectors alive until Chart::new() uses them
        let owned: Vec<Vec<(f64, f64)>> = chart
            .series
            .iter()
            .map(|s| {
                s.points()
                    .map(|p| {
                        let x = (p.timestamp - origin).num_milliseconds() as f64 / 1000.0;
                        (x, p.value)
                    })
                    .collect()
            })
            .collect();

        let datasets: Vec<Dataset> = chart
            .series
            .iter()
            .zip(&owned)
            .enumerate()
            .map(|(i, (s, data))| {
                let mut style = Style::default().fg(series_color(i));
                if i == self.focused {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Dataset::default()
                    .name(s.name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(style)
                    .data(data.as_slice())
            })
            .collect();

        let (ymin, ymax) =
            ChartPanel::compute_y_bounds(owned.iter().flat_map(|d| d.iter().map(|&(_, y)| y)));
        let xmax = ((latest - origin).num_milliseconds() as f64 / 1000.0).max(1.0);

        let mut y_labels: Vec<Span> = Vec::with_capacity(5);
        for i in 0..5 {
            let v = ymin + (ymax - ymin) * (i as f64) / 4.0;
            y_labels.push(Span::raw(format!("{:.0} qps", v)));
        }
        let x_labels = vec![
            Span::raw(origin.format("%H:%M:%S").to_string()),
            Span::raw(latest.format("%H:%M:%S").to_string()),
        ];

        let widget = Chart::new(datasets)
            .block(
                Block::default()
                    .title(chart.title.clone())
                    .borders(Borders::ALL),
            )
            .x_axis(Axis::default().bounds([0.0, xmax]).labels(x_labels))
            .y_axis(Axis::default().bounds([ymin, ymax]).labels(y_labels));

        f.render_widget(widget, area);
    }
}
