//! typhoon-track CLI entry point
//!
//! Typhoon track synthesis - CLI + web API

use typhoon_track::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
