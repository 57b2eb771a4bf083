//! src/panels/status.rs
//!
//! Status panel: poll counters, the last failure, and the key bindings.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::Panel;
use crate::graph::shared::DashboardState;

pub struct StatusPanel<'a> {
    pub state: &'a DashboardState,
}

impl<'a> StatusPanel<'a> {
    pub fn new(state: &'a DashboardState) -> Self {
        Self { state }
    }
}

impl Panel for StatusPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let st = self.state;
        let mut lines = vec![Line::from(format!(
            "rebuilds={}  appends={}  failures={}      TAB=Focus series  Q=Quit",
            st.rebuilds, st.appends, st.failures
        ))];
        if let Some((at, err)) = &st.last_error {
            lines.push(Line::styled(
                format!("{} {}", at.format("%H:%M:%S"), err),
                Style::default().fg(Color::Red),
            ));
        }

        let p = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
