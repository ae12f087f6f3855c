//! FolioQA - Portfolio Q&A chat service
//!
//! Main entry point for the FolioQA HTTP service.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folioqa::cli::{Cli, Commands, ModelCommand};
use folioqa::commands;
use folioqa::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load and validate configuration
    let mut config = Config::load(&cli.config)?;
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                tracing::debug!("Using host override from CLI: {}", host);
                config.server.host = host;
            }
            if let Some(port) = port {
                tracing::debug!("Using port override from CLI: {}", port);
                config.server.port = port;
            }

            tracing::info!("Starting FolioQA server");
            folioqa::server::run(config).await
        }
        Commands::Models { command } => match command {
            ModelCommand::List => {
                tracing::info!("Listing available models");
                commands::models_list(config).await
            }
        },
    }
}

/// Initialize the tracing subscriber
///
/// Respects `RUST_LOG` when set; otherwise defaults to `info`, or `debug`
/// when `--verbose` is passed.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "folioqa=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
