use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "classictvctl",
    version,
    about = "Build round-robin playlists of unwatched classic TV episodes"
)]
pub struct Cli {
    /// Configuration file (TOML or JSON). Overrides CLASSICTV_CONFIG_PATH.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `classictv_core=trace`. Defaults to
    /// RUST_LOG, then `info`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate playlists for every configured user
    Generate {
        /// Library snapshot to read and update
        #[arg(long)]
        library: Option<PathBuf>,
        /// Print each user's playlist without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the playlist one user would get
    Preview {
        /// User identifier
        #[arg(long)]
        user: String,
        /// Library snapshot to read
        #[arg(long)]
        library: Option<PathBuf>,
    },
    /// Show the effective configuration and any warnings
    CheckConfig,
    /// List the series and users in a library snapshot
    Library {
        /// Library snapshot to read
        #[arg(long)]
        library: Option<PathBuf>,
    },
    /// Describe the scheduled task this tool runs
    Describe,
}
