use crate::cli::Command;
use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Operator running `dyncmd` from a terminal.
    LocalDev,
    /// Invocation from a script or scheduler hook that should stay quiet on the console.
    Pipeline,
}

impl ExecutionContext {
    /// Returns `true` when console sinks should be disabled by default.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::Pipeline)
    }
}

/// Derive the active execution context from a parsed CLI command plus overrides.
pub fn detect_context(command: &Command) -> ExecutionContext {
    if pipeline_override_enabled() {
        return ExecutionContext::Pipeline;
    }

    match command {
        Command::Derive(_) | Command::Param(_) => ExecutionContext::LocalDev,
    }
}

fn pipeline_override_enabled() -> bool {
    env::var("DYNCMD_PIPELINE")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}
