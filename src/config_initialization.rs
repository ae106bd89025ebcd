//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::EditorConfig;
use crate::ports::ConfigPort;
use crate::utils::logging::{LogFormat, LogLevel};

/// Resolve configuration following precedence: CLI > Env > File > Defaults
///
/// Runs before the global subscriber exists, so warnings raised while reading
/// the file go to a scoped stderr subscriber.
pub async fn initialize_configuration_hierarchy(
    config_port: &dyn ConfigPort,
    cli: &Cli,
) -> Result<EditorConfig> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut config = config_port
        .load_config()
        .await
        .context("Failed to load configuration")?;
    config.apply_env_overrides();
    apply_cli_configuration_overrides(&mut config, cli)?;
    Ok(config)
}

/// Apply global CLI flags on top of the loaded configuration
pub fn apply_cli_configuration_overrides(config: &mut EditorConfig, cli: &Cli) -> Result<()> {
    if let Some(level) = &cli.log_level {
        config.log_level = LogLevel::parse(level).context("Invalid --log-level")?;
    }
    if let Some(format) = &cli.log_format {
        config.log_format = LogFormat::parse(format).context("Invalid --log-format")?;
    }
    Ok(())
}
