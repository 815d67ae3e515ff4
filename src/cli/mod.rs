mod args;
mod commands;
mod state;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ports::ClockPort;

use args::{Cli, Commands};

#[derive(Debug, Clone, Copy)]
pub(crate) struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> chrono::DateTime<Utc> {
        Utc::now()
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gh_radar=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            config,
            interval_minutes,
        } => {
            let mut cfg = crate::config::load_config(config.as_deref())?;
            if let Some(interval) = interval_minutes {
                cfg.interval_minutes = interval.max(crate::config::MIN_INTERVAL_MINUTES);
            }
            commands::watch::run(cfg).await
        }
        Commands::Once { config, json } => {
            let cfg = crate::config::load_config(config.as_deref())?;
            commands::once::run(cfg, json).await
        }
        Commands::Check { config } => {
            let cfg = crate::config::load_config(config.as_deref())?;
            commands::check::run(cfg).await
        }
        Commands::Init {
            path,
            force,
            reset_state,
        } => {
            if reset_state {
                commands::init::run_reset_state(path)
            } else {
                commands::init::run(path, force)
            }
        }
        Commands::Rules { config, command } => {
            let cfg = crate::config::load_config(config.as_deref())?;
            commands::rules::run(cfg, command)
        }
        Commands::Inbox { config, command } => {
            let cfg = crate::config::load_config(config.as_deref())?;
            commands::inbox::run(cfg, command)
        }
    }
}
