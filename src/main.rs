#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use color_eyre::Result;
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod db;
mod diagram;

use cli::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.debug { "debug" } else { "info" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.run() {
        Ok(()) => Ok(()),
        // User errors get a one-line report; anything else is an internal
        // error and keeps the full color-eyre report.
        Err(report) => match report.downcast_ref::<diagram::Error>() {
            Some(err) => {
                eprintln!("{} {err}", style("error:").red().bold());
                std::process::exit(1);
            }
            None => Err(report),
        },
    }
}
