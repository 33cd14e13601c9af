pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fpl-relay")]
#[command(author, version, about = "HTTP relay for the FPL API - adds CORS headers for a static front-end")]
pub struct Cli {
    /// Path to config file (checked in order: local config.toml, ~/.config/fpl-relay/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server
    Start {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show relay configuration and whether a server is running
    Status,
}
