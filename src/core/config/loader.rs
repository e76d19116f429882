#![allow(clippy::result_large_err)]

use super::{ConfigValidator, DyncmdConfig};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};

/// File name looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = "dyncmd.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/dyncmd.toml)
    /// Environment variables override config file values
    /// A missing file yields defaults plus env overrides
    pub fn load_from_workspace(workspace_path: &Path) -> Result<DyncmdConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        let config_file = Self::load_from_file(&config_path)?;

        let mut config = config_file.unwrap_or_default();

        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;

        tracing::debug!(
            path = %config_path.display(),
            pretty = config.output.pretty,
            "loaded dyncmd configuration"
        );
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<DyncmdConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorCategory::IoError,
                format!("Failed to read config file {}", path.display()),
                Box::new(e),
            )
            .with_code("CONFIG-001")
        })?;

        let config: DyncmdConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigurationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("CONFIG-002")
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(config: &mut DyncmdConfig) -> Result<(), AppError> {
        if let Ok(pretty) = env::var("DYNCMD_OUTPUT_PRETTY") {
            config.output.pretty = pretty.trim().parse::<bool>().map_err(|_| {
                AppError::new(
                    ErrorCategory::ConfigurationError,
                    format!("DYNCMD_OUTPUT_PRETTY must be true or false, got '{}'", pretty),
                )
                .with_code("CONFIG-004")
            })?;
        }

        if let Ok(dir) = env::var("DYNCMD_OUTPUT_DIR") {
            config.output.dir = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "DYNCMD_OUTPUT_PRETTY - Override JSON pretty printing (true/false, default: true)",
            "DYNCMD_OUTPUT_DIR - Override the default output directory for derived commands",
            "DYNCMD_LOG_DIR - Override the log directory",
            "DYNCMD_CONSOLE_OUTPUT - Console log sink (stdout/stderr/none)",
            "DYNCMD_PIPELINE - Set to 1 to silence console logging",
        ]
    }
}
