//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod fetch;
pub mod serve;
pub mod status;
pub mod track;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Typhoon track synthesis and multi-agency data service
#[derive(Parser)]
#[command(name = "typhoon-track")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a typhoon record from one agency
    Fetch(fetch::FetchArgs),

    /// Synthesize a track over an hour range
    Track(track::TrackArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show server and agency status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch(args) => fetch::run(args).await,
        Commands::Track(args) => track::run(args),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}

/// Initialize logging to stderr
///
/// `RUST_LOG` overrides `default_level`.
pub(crate) fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
