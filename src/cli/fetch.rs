//! Fetch command handler
//!
//! Gets one agency's record through the data service and prints it.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::source::service::TyphoonService;
use crate::track::available_sources;
use clap::Args;

/// Fetch command arguments
#[derive(Args)]
pub struct FetchArgs {
    /// Source agency (hko, cma, jma)
    pub source: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Skip the network and synthesize
    #[arg(long)]
    pub offline: bool,

    /// Seed for reproducible synthesis
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available sources
    #[arg(short = 'S', long = "list-sources")]
    pub list_sources: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the fetch command
pub async fn run(args: FetchArgs) -> Result<()> {
    if args.list_sources {
        list_sources();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    super::init_logging("warn");

    let mut config = Config::load()?;
    if args.offline {
        config.sources.offline = true;
    }
    if args.seed.is_some() {
        config.synthesis.seed = args.seed;
    }

    let source = args.source.unwrap_or(config.defaults.source.clone());
    let format = args.format.unwrap_or(config.defaults.format.clone());

    // Resolve the formatter before touching the network
    let formatter =
        get_formatter(&format).ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let service = TyphoonService::new(&config);
    let record = service.get_typhoon_data_by_name(&source).await?;
    let output = formatter.format(&record)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available sources
fn list_sources() {
    println!("Available sources:");
    for source in available_sources() {
        println!("  {:4} - {}", source, source.display_name());
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:4} - {}", format.name, format.description);
    }
}
