//! Recut timeline editor
//!
//! Trim markers and animated crop keyframes for video projects, driven from
//! the command line.
//!
//! # Usage
//!
//! ```bash
//! recut inspect project.json --fps 30 --duration 02:00
//! recut edit clip.mp4 --fps 30 --duration 02:00 seek=10 marker seek=20 marker seek=15 trim
//! recut export clip.json --fps 30 --duration 02:00 --output out.webm --crf 20
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};

use recut_cli::adapters::TomlConfigAdapter;
use recut_cli::app::container::DefaultAppContainer;
use recut_cli::cli::{commands, Cli, Commands};
use recut_cli::config_initialization::initialize_configuration_hierarchy;
use recut_cli::ports::ConfigPort;
use recut_cli::utils::logging::LoggingSystem;

/// Main entry point for the Recut CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_port: Arc<dyn ConfigPort> = match &cli.config {
        Some(path) => Arc::new(TomlConfigAdapter::with_path(path)),
        None => Arc::new(TomlConfigAdapter::new()),
    };
    let config = initialize_configuration_hierarchy(config_port.as_ref(), &cli).await?;

    let logging = LoggingSystem::new(config.logging());
    logging.initialize()?;
    logging.log_system_info();
    debug!(?config, "Configuration resolved");

    let container = DefaultAppContainer::new(config_port, config.progress_interval_frames);

    let result = match cli.command {
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(&container, args).await
        }
        Commands::Edit(args) => {
            info!("Executing edit command");
            commands::edit(&container, args).await
        }
        Commands::Export(args) => {
            info!("Executing export command");
            commands::export(&container, &config, args).await
        }
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
