//! src/panels/title.rs
//!
//! Header: which process is on screen and where it is polled from.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
};

use super::Panel;

pub struct TitlePanel<'a> {
    pub process: Option<&'a str>,
    pub source: &'a str,
}

impl<'a> TitlePanel<'a> {
    pub fn new(process: Option<&'a str>, source: &'a str) -> Self {
        Self { process, source }
    }
}

impl Panel for TitlePanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let text = match self.process {
            Some(p) => format!("{}  @ {}", p, self.source),
            None => format!("connecting to {}", self.source),
        };
        let p = Paragraph::new(text)
            .block(Block::default().title("QPS Monitor").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
