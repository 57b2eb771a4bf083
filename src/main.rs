//! src/main.rs
//!
//! Entrypoint: parse flags, set up error reporting and logging, then delegate
//! to `app::run()`.

mod app;
mod cli;
mod error;
mod graph;
mod logging;
mod net;
mod panels;
mod poller;
mod sample;

use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = cli::Cli::parse();
    logging::init()?;
    app::run(cli.into_config())
}
