use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use giftwise_cli::Cli;
use giftwise_core::config::{AppConfig, LogFormat, LoggingConfig};

fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing::Level;

    let log_level = config.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    // stdout carries the command payload, so logs go to stderr.
    match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow::anyhow!("failed to install tracing subscriber: {error}"))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // A broken config is reported by the command itself; logging falls back to defaults.
    let logging = AppConfig::load(cli.global.load_options())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    init_logging(&logging)?;

    Ok(giftwise_cli::run(&cli))
}
