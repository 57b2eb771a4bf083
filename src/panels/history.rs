//! src/panels/history.rs
//!
//! History panel: the focused series' held points, newest at the bottom.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Panel;
use crate::graph::{Series, TimePoint};

pub struct HistoryPanel<'a> {
    pub series: Option<&'a Series>,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(series: Option<&'a Series>) -> Self {
        Self { series }
    }

    /// `d/m/Y H:M:S : value`
    fn format_point(p: &TimePoint) -> String {
        format!("{} : {}", p.timestamp.format("%-d/%-m/%Y %H:%M:%S"), p.value)
    }
}

impl Panel for HistoryPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let (title, lines) = match self.series {
            None => ("History".to_string(), Vec::new()),
            Some(s) => {
                // inner height, minus the borders
                let height = area.height.saturating_sub(2) as usize;
                let start = s.len().saturating_sub(height);
                let last_index = s.len().saturating_sub(1);
                let lines: Vec<Line> = s
                    .points()
                    .enumerate()
                    .skip(start)
                    .map(|(i, p)| {
                        let style = if i == last_index {
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Cyan)
                        };
                        Line::from(vec![Span::styled(HistoryPanel::format_point(p), style)])
                    })
                    .collect();
                (format!("History: {}", s.name), lines)
            }
        };

        let block = Block::default().title(title).borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
