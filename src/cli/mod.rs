//! CLI module for the user registry
//!
//! - `serve`: run the HTTP API

pub mod serve;

use clap::{Parser, Subcommand};

/// User registry - user management API with paged, ordered listings
#[derive(Parser)]
#[command(name = "user-registry-api")]
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
