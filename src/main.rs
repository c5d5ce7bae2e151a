#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! deis: manage annotations, tolerations and builds of Deis Workflow apps.

mod api;
mod cli;
mod commands;
mod errors;
mod parse;
mod render;
mod settings;
mod types;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

use cli::{Cli, OutputCtx, write_error};
use commands::Session;
use errors::CliError;
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.debug) {
        eprintln!("Warning: logging disabled: {err:#}");
    }

    let ctx = OutputCtx::new(cli.json, !cli.no_progress, cli.debug);

    if let Err(err) = run(&cli, &ctx) {
        write_error(&ErrorOutput::from_cli_error(&err), &ctx);
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    {
        let mut session = Session::new(ctx, &mut out, cli.config.clone());
        commands::dispatch(&cli.command, &mut session)?;
    }
    out.flush()?;
    Ok(())
}

/// Log to stderr so stdout stays parseable. `--debug` raises the level.
fn init_logging(debug: bool) -> anyhow::Result<()> {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .finish()
        .try_init()
        .context("installing the stderr log subscriber")
}
