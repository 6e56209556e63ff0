//! Strata CLI - Command-line interface for the Strata extraction engine.

use anyhow::Context;
use clap::Parser;
use strata_cli::commands;
use strata_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.settings.as_deref()).context("Failed to load settings")?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => {
            let source = args.source.clone();
            commands::execute_extract(args, &config, &formatter)
                .await
                .with_context(|| format!("Extraction of {} failed", source))?;
        }
        Command::Configs(args) => {
            commands::execute_configs(args, &config, &formatter)?;
        }
    }

    Ok(())
}
