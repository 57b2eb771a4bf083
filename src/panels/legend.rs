//! src/panels/legend.rs
//!
//! Legend panel: one row per series with last/min/max/avg over the window.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Panel, series_color};
use crate::graph::{ChartOption, Series};

pub struct LegendPanel<'a> {
    pub chart: Option<&'a ChartOption>,
    pub focused: usize,
}

impl<'a> LegendPanel<'a> {
    pub fn new(chart: Option<&'a ChartOption>, focused: usize) -> Self {
        Self { chart, focused }
    }

    fn stats_text(series: &Series) -> String {
        match series.stats() {
            Some(st) => format!(
                "last={:.0}  min={:.0}  max={:.0}  avg={:.1}  ({} pts)",
                st.last,
                st.min,
                st.max,
                st.avg,
                series.len()
            ),
            None => "no data".to_string(),
        }
    }
}

impl Panel for LegendPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = match self.chart {
            None => vec![Line::from("-")],
            Some(chart) => chart
                .series
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let focused = i == self.focused;
                    let mut name_style = Style::default().fg(series_color(i));
                    if focused {
                        name_style = name_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Line::from(vec![
                        Span::raw(if focused { "> " } else { "  " }),
                        Span::styled(format!("{:<16}", s.name), name_style),
                        Span::raw(LegendPanel::stats_text(s)),
                    ])
                })
                .collect(),
        };

        let block = Block::default().title("Legend").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TimePoint;
    use chrono::Local;

    #[test]
    fn stats_text_reports_window_summary() {
        let now = Local::now();
        let mut s = Series::new("Echo", 20, TimePoint::new(now, 4.0));
        s.push_point(TimePoint::new(now, 8.0));
        assert_eq!(
            LegendPanel::stats_text(&s),
            "last=8  min=4  max=8  avg=6.0  (2 pts)"
        );
    }
}
