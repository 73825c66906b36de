mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod presentation;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, GlobalArgs};
use commands::Runnable;

/// Log to stderr; `GITCLOCK_LOG` overrides the level picked by `-q`/`-v`.
fn configure_tracing(g: &GlobalArgs) -> Result<()> {
    use tracing_subscriber::{filter::LevelFilter, EnvFilter};

    let level_filter = if g.quiet {
        LevelFilter::ERROR
    } else {
        match g.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("GITCLOCK_LOG")
        .from_env()
        .context("Failed to parse filters from GITCLOCK_LOG environment variable")?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn try_main(cli: Cli) -> Result<()> {
    configure_tracing(&cli.global).context("Failed to initialize logging")?;
    cli.hours.run(&cli.global)
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.global.verbose;
    if let Err(e) = try_main(cli) {
        if verbose > 1 {
            eprintln!("Error: {e:?}");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
