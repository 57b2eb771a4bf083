//! src/panels.rs
//!
//! Top-level panels module, the `Panel` trait, and re-exports.

pub mod chart;
pub mod history;
pub mod legend;
pub mod status;
pub mod title;

pub use chart::ChartPanel;
pub use history::HistoryPanel;
pub use legend::LegendPanel;
pub use status::StatusPanel;
pub use title::TitlePanel;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::LightBlue,
    Color::LightRed,
    Color::LightGreen,
    Color::White,
];

/// Stable color for the series at `idx` (the chart and legend must agree).
pub fn series_color(idx: usize) -> Color {
    PALETTE[idx % PALETTE.len()]
}
