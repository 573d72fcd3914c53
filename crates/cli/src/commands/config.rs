//! Configuration management.

use crate::commands::ConfigCommands;
use crate::error::CliError;
use crate::output;
use anyhow::Result;
use openlap_config::AppConfig;
use std::path::Path;

pub fn execute(command: &ConfigCommands, config_path: &Path, json: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = AppConfig::load_or_default(config_path)
                .map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;
            output::print_config(&config, json);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            if config_path.exists() && !force {
                return Err(CliError::ValidationError(format!(
                    "{} already exists; pass --force to overwrite",
                    config_path.display()
                ))
                .into());
            }
            AppConfig::default().save(config_path)?;
            output::print_status(
                &format!("Wrote default configuration to {}", config_path.display()),
                json,
            );
            Ok(())
        }
    }
}
