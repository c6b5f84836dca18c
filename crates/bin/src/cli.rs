//! CLI argument definitions for the Hexframe binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite database (default)
    Sqlite,
    /// PostgreSQL database
    Postgres,
    /// In-memory with JSON persistence
    Inmemory,
}

/// Hexframe maintenance tool
#[derive(Parser, Debug)]
#[command(name = "hexframe")]
#[command(about = "Hexframe: address tools and data migrations for hexagonal maps")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collapse legacy composition containers into composed children
    Migrate(MigrateArgs),
    /// Inspect an address: depth, parent, children and siblings
    Address(AddressArgs),
}

/// Storage selection shared by commands that open a store
#[derive(clap::Args, Debug, Clone)]
pub struct BackendConfig {
    /// Storage backend to use
    #[arg(short, long, default_value = "sqlite", env = "HEXFRAME_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores hexframe.db
    /// For InMemory: stores hexframe.json
    #[arg(short = 'D', long, env = "HEXFRAME_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL connection URL (required when backend=postgres)
    #[arg(long, env = "HEXFRAME_POSTGRES_URL")]
    pub postgres_url: Option<String>,
}

/// Arguments for the migrate command
#[derive(clap::Args, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub backend_config: BackendConfig,

    /// Compute and print the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the address command
#[derive(clap::Args, Debug)]
pub struct AddressArgs {
    /// Address to inspect, e.g. "1,0:1,-3"
    pub id: String,
}
