//! # husk-cli
//!
//! Entry point for the husk vendor package API. Parses flags, sets up
//! logging, builds the async runtime, and runs the server until a shutdown
//! signal arrives.

use clap::Parser;
use tracing::info;

use husk_core::error::{HuskError, HuskResult};
use husk_server::ServerConfig;

/// Aggregated Packagist vendor catalogs over HTTP
#[derive(Parser)]
#[command(name = "husk", version, about = "Run the husk vendor package API")]
pub struct Cli {
    /// Port to run the server on
    #[arg(short, long, default_value_t = 3000, env = "HUSK_PORT")]
    port: u16,

    /// Address to bind the listener on
    #[arg(long, default_value = "0.0.0.0", env = "HUSK_BIND_ADDRESS")]
    bind_address: String,

    /// Base URL of the upstream package registry
    #[arg(long, env = "HUSK_REGISTRY_URL")]
    registry_url: Option<String>,

    /// Overall deadline for one aggregation request, in seconds
    #[arg(long, default_value_t = 10)]
    deadline_secs: u64,

    /// Maximum number of concurrent detail fetches per request
    #[arg(long, default_value_t = 32)]
    max_in_flight: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> HuskResult<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Starting husk API v{}", env!("CARGO_PKG_VERSION"));

    run_server(cli)
}

fn run_server(cli: Cli) -> HuskResult<()> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| HuskError::Io {
        message: "Failed to create async runtime".to_string(),
        source: e,
    })?;

    let mut config = ServerConfig {
        bind_address: cli.bind_address,
        port: cli.port,
        deadline_secs: cli.deadline_secs,
        max_in_flight: cli.max_in_flight,
        ..ServerConfig::default()
    };
    if let Some(registry_url) = cli.registry_url {
        config.registry_url = registry_url;
    }

    rt.block_on(husk_server::serve(config))
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "husk={level},husk_server={level},husk_registry={level},husk_core={level}"
        ))
        .with_target(false)
        .init();
}
