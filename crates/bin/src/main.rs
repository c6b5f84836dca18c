use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use output::OutputFormat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hexframe=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Migrate(args) => commands::migrate::run(&args, format).await,
        Commands::Address(args) => commands::address::run(&args, format),
    }
}
