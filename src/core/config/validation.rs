#![allow(clippy::result_large_err)]

use super::DyncmdConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &DyncmdConfig) -> Result<(), AppError> {
        if let Some(dir) = &config.output.dir {
            if dir.as_os_str().to_string_lossy().trim().is_empty() {
                return Err(AppError::new(
                    ErrorCategory::ConfigurationError,
                    "output.dir cannot be empty",
                )
                .with_code("CONFIG-003"));
            }
        }

        Ok(())
    }
}
