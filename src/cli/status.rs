//! Status command handler
//!
//! Shows agency reachability and, optionally, a running server's state.

use crate::config::Config;
use crate::error::Result;
use crate::random::{describe, get_random};
use crate::source::service::TyphoonService;
use crate::track::available_sources;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,

    /// Skip agency reachability checks
    #[arg(long)]
    pub offline: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    super::init_logging("warn");

    let mut config = Config::load()?;
    if args.offline {
        config.sources.offline = true;
    }

    if args.server {
        check_server_status(&config).await;
    }

    let service = TyphoonService::new(&config);
    let rng = describe(get_random(config.synthesis.seed).as_ref());

    println!("typhoon-track v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!(
        "Synthesis: {} random source{}",
        rng.name,
        config
            .synthesis
            .seed
            .map(|s| format!(" (seed {})", s))
            .unwrap_or_default()
    );
    println!("Cache TTL: {} ms", config.cache.ttl_ms);
    println!();

    if service.is_offline() {
        println!("Sources (offline, all records synthesized):");
    } else {
        println!("Sources:");
    }

    let status = service.api_status().await;
    for source in available_sources() {
        let state = match status.get(&source) {
            _ if service.is_offline() => "SKIPPED",
            Some(s) if s.available => "REACHABLE",
            _ => "UNREACHABLE",
        };
        println!("  {:4} {:12} {}", source, state, service.endpoint(source));
    }

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let base = format!("http://{}", config.server_addr());

    match reqwest::get(format!("{}/api/health", base)).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(health) = response.json::<serde_json::Value>().await {
                    if let Some(version) = health.get("version").and_then(|v| v.as_str()) {
                        println!("  Version: {}", version);
                    }
                    if let Some(uptime) = health.get("uptimeSecs").and_then(|v| v.as_u64()) {
                        println!("  Uptime:  {}s", uptime);
                    }
                }
                print_server_cache(&base).await;
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}

/// Print a running server's cache entries
async fn print_server_cache(base: &str) {
    let Ok(response) = reqwest::get(format!("{}/api/cache", base)).await else {
        return;
    };
    let Ok(cache) = response.json::<serde_json::Value>().await else {
        return;
    };

    match cache.get("entries").and_then(|e| e.as_object()) {
        Some(entries) if !entries.is_empty() => {
            println!("  Cached:");
            for (source, entry) in entries {
                let age = entry.get("ageMs").and_then(|v| v.as_u64()).unwrap_or(0);
                let fresh = entry.get("fresh").and_then(|v| v.as_bool()).unwrap_or(false);
                println!(
                    "    {:4} {:>8} ms {}",
                    source,
                    age,
                    if fresh { "fresh" } else { "stale" }
                );
            }
        }
        _ => println!("  Cached:  none"),
    }
}
