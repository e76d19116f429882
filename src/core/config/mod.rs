use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration loaded from `dyncmd.toml` at the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DyncmdConfig {
    /// How the CLI writes derived commands
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Pretty-print JSON documents
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Directory receiving `<code>-<version>.json` when no output file is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            pretty: default_pretty(),
            dir: None,
        }
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
