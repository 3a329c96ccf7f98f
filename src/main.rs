use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

pub use cli::*;
pub use commands::*;
pub use safenav::services::output::{print_error, print_list, print_one};
pub use safenav::*;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(cli.json, &e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = resolve_settings(Overrides {
        config: cli.config.clone(),
        data_dir: cli.data_dir.clone(),
        log_level: cli.log_level.clone(),
    })?;
    init_logging(&settings)?;
    tracing::debug!(data_dir = %settings.data_dir.root().display(), "session starting");

    let mut session = Session::open(&settings);

    if handle_block_commands(cli, &mut session)? {
        return Ok(());
    }
    if handle_allowed_commands(cli, &mut session)? {
        return Ok(());
    }
    if handle_pin_commands(cli, &mut session)? {
        return Ok(());
    }
    handle_runtime_commands(cli, &mut session)
}

/// Logs go to stderr (or the configured file) so stdout stays parseable.
fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(log_file) = &settings.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .context("failed to open log file")?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
