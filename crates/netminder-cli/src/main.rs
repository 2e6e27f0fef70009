//! `netminder` - record goalkeeper shots and report on them

mod cli;
mod commands;
mod config;

use std::io;

use anyhow::Context;
use clap::Parser;
use netminder_db::Store;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::TrackerConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = TrackerConfig::discover(cli.config.as_deref()).context("failed to load config")?;
    init_tracing(&config.log_filter);

    let store = open_store(&cli, &config)?;
    if cli.seed || config.seed_demo {
        store.seed_demo().context("failed to seed demo sessions")?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = commands::run(cli.command, &store, &config, cli.json, &mut out);
    store.close();
    result
}

/// `RUST_LOG` wins over the configured filter. Logs go to stderr.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_store(cli: &Cli, config: &TrackerConfig) -> anyhow::Result<Store> {
    if cli.memory {
        return Ok(Store::in_memory()?);
    }
    match cli.db.as_ref().or(config.database.as_ref()) {
        Some(path) => Store::open(path)
            .with_context(|| format!("failed to open database: {}", path.display())),
        None => Ok(Store::in_memory()?),
    }
}
