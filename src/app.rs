//! src/app.rs
//!
//! Live QPS dashboard for a single process.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Builds the HTTP metrics source, starts the poller thread, and runs the UI
//! main loop for the terminal dashboard.
//!
//! ## Overview
//! The application:
//! - Polls `GET http://<addr>/stats` on a fixed interval.
//! - Keeps one rolling series per metric (`Total` plus one per method).
//! - Renders all series on one chart with a legend and a point history.
//!
//! # Running
//!
//! ```text
//! cargo run --release -- --addr 127.0.0.1:8080 --interval-ms 1000 --capacity 20
//! ```
//!
//! Logging is off by default because the dashboard owns the terminal:
//! ```text
//! QPS_MONITOR_LOG=/tmp/qps-monitor.log RUST_LOG=debug cargo run
//! ```
//!
//! # Keyboard Controls
//!
//! - **Tab** — Cycle the focused series (highlighted in the chart and legend,
//!   shown in the History panel).
//! - **q** — Quit and restore terminal state.
//!
//! # Chart Resets
//!
//! The chart is rebuilt from scratch, with one point per series, when the
//! observed process changes pid or when its set of reported methods grows or
//! shrinks. Otherwise each poll adds one point per series and drops the
//! oldest once a series holds `--capacity` points.
//!
//! A failed poll (endpoint down, bad JSON) keeps the chart as it was, shows
//! the error on the status line, and polling carries on at the next tick.
//!
//! # Threads
//!
//! The poller thread owns the series store and publishes owned snapshots into
//! the shared [`DashboardState`]. The UI loop copies the state out under a
//! short read lock and draws from the copy, so a slow frame never holds the
//! poller up.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use ratatui::layout::{Constraint, Direction, Layout};
use tracing::info;

use crate::graph::MonitorConfig;
use crate::graph::shared::{DashboardState, SharedDashboard};
use crate::net::{HttpSource, MetricsSource};
use crate::panels::{ChartPanel, HistoryPanel, LegendPanel, Panel, StatusPanel, TitlePanel};
use crate::poller;

const FRAME_TIME: Duration = Duration::from_millis(100);

pub fn run(config: MonitorConfig) -> Result<()> {
    let shared: SharedDashboard = Arc::new(RwLock::new(DashboardState::new()));

    // a single request may take at most one interval
    let source = HttpSource::new(config.stats_url(), config.interval)?;
    let source_label = source.describe();
    info!(
        url = %source_label,
        interval_ms = config.interval.as_millis() as u64,
        capacity = config.capacity,
        "starting dashboard"
    );

    let handle = poller::spawn(&config, source, shared.clone());

    let mut terminal = ratatui::init();
    let result = ui_loop(&mut terminal, &shared, &source_label);
    ratatui::restore();

    handle.stop();
    result
}

fn ui_loop(terminal: &mut DefaultTerminal, shared: &SharedDashboard, source: &str) -> Result<()> {
    let mut focused = 0usize;

    loop {
        let frame_start = Instant::now();

        let state = shared
            .read()
            .map(|g| g.clone())
            .unwrap_or_else(|e| e.into_inner().clone());

        let series_count = state.chart.as_ref().map_or(0, |c| c.series.len());
        focused = focused.min(series_count.saturating_sub(1));

        terminal.draw(|f| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(10),
                    Constraint::Length(4),
                ])
                .split(f.area());
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(rows[1]);
            let side = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(body[1]);

            let chart = state.chart.as_ref();
            TitlePanel::new(chart.map(|c| c.title.as_str()), source).draw(f, rows[0]);
            ChartPanel::new(chart, focused).draw(f, body[0]);
            LegendPanel::new(chart, focused).draw(f, side[0]);
            HistoryPanel::new(chart.and_then(|c| c.series.get(focused))).draw(f, side[1]);
            StatusPanel::new(&state).draw(f, rows[2]);
        })?;

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Tab if series_count > 0 => {
                        focused = (focused + 1) % series_count;
                    }
                    _ => {}
                }
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
