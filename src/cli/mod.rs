//! CLI entry points

pub mod serve;

use clap::{Parser, Subcommand};

/// Collaborative checklist backend with live updates
#[derive(Parser)]
#[command(name = "steptogether")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
