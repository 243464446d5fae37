//! Command-line interface for the book review server.

mod commands;

use clap::{Parser, Subcommand};

/// Book review GraphQL API server
#[derive(Parser)]
#[command(name = "bookreview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the GraphQL server until interrupted (default)
    Serve,

    /// Add the starter catalogue of Brazilian classics
    Seed,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Print the GraphQL schema in SDL form
    Schema,
}

pub use commands::*;
