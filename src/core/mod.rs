pub mod command_param;
pub mod config;
pub mod dynamic_command;
pub mod entities;
pub mod error;
pub mod types;

pub use command_param::{
    command_param_value, merge_command_param, CommandParams, CMD_COMMAND_TYPE_PARAMS,
    CMD_PARAM_START_PARAMS,
};
pub use config::{ConfigLoader, ConfigValidator, DyncmdConfig};
pub use dynamic_command::{create_command, DynamicCommandBuilder};
pub use entities::{
    CommandDescriptor, CommandType, DataType, Direct, FailureStrategy, ParameterMap, Priority,
    Property, TaskDependType, WarningType, WorkflowInstanceSnapshot,
};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use types::*;
