use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wallet risk scorer CLI (library-facing definitions)
#[derive(Debug, Parser)]
#[command(
    name = "risk-scorer",
    about = "Batch trust scoring for Compound protocol wallets",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch histories, score every configured wallet, write the CSV
    Score {
        /// Path to the TOML configuration file
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
        /// Override the configured output path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate the configuration and print the effective settings
    CheckConfig {
        /// Path to the TOML configuration file
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
}
