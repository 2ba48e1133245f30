use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

mod cli;
mod commands;
mod snapshot;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into()),
    };
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Generate {
            library,
            dry_run,
            json,
        } => {
            let loaded = commands::load_config(config_path)?;
            commands::generate(&loaded, library.as_deref(), dry_run, json)
                .await
        }
        Command::Preview { user, library } => {
            let loaded = commands::load_config(config_path)?;
            commands::preview(&loaded, &user, library.as_deref()).await
        }
        Command::CheckConfig => {
            let loaded = commands::load_config(config_path)?;
            commands::check_config(&loaded).await
        }
        Command::Library { library } => {
            let loaded = commands::load_config(config_path)?;
            commands::library(&loaded, library.as_deref()).await
        }
        Command::Describe => commands::describe(),
    }
}
