use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Error raised when a `--param` value is not `KEY=VALUE`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamArgError {
    #[error("expected KEY=VALUE, got '{0}'")]
    MissingSeparator(String),
    #[error("parameter name cannot be empty in '{0}'")]
    EmptyKey(String),
}

/// Parse one `KEY=VALUE` pair. The value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), ParamArgError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ParamArgError::MissingSeparator(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParamArgError::EmptyKey(raw.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Workflow instance snapshot (JSON) that forks the sub-workflow
    #[arg(long, value_name = "FILE")]
    pub instance: PathBuf,

    /// Code of the sub-workflow definition to run
    #[arg(long, value_name = "CODE")]
    pub definition_code: Option<i64>,

    /// Version of the sub-workflow definition to run
    #[arg(long, value_name = "VERSION")]
    pub definition_version: Option<i32>,

    /// Caller parameter; repeat for several. Parent global parameters win on conflict
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// JSON object of caller parameters, applied before --param values
    #[arg(long, value_name = "FILE")]
    pub params_file: Option<PathBuf>,

    /// Write the command here instead of stdout or the configured output directory
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Workspace holding dyncmd.toml and .dyncmd/ (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ParamArgs {
    #[command(subcommand)]
    pub command: ParamCommand,
}

#[derive(Subcommand, Debug)]
pub enum ParamCommand {
    /// Print one metadata value
    Get {
        /// Command document (JSON)
        #[arg(value_name = "COMMAND_FILE")]
        file: PathBuf,
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Set one metadata value, keeping every other key
    Set {
        /// Command document (JSON)
        #[arg(value_name = "COMMAND_FILE")]
        file: PathBuf,
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Print every metadata entry as KEY=VALUE lines
    List {
        /// Command document (JSON)
        #[arg(value_name = "COMMAND_FILE")]
        file: PathBuf,
    },
}
