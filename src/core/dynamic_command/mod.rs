#![allow(clippy::result_large_err)]

//! Builds the follow-on command a running workflow instance submits when it
//! forks a dynamically chosen sub-workflow.

use crate::core::command_param::{CMD_COMMAND_TYPE_PARAMS, CMD_PARAM_START_PARAMS};
use crate::core::entities::{
    CommandDescriptor, CommandType, ParameterMap, Property, TaskDependType,
    WorkflowInstanceSnapshot,
};
use crate::core::error::AppError;

/// Fluent entry point for deriving a sub-workflow command from its parent.
///
/// ```
/// use dyncmd::core::{CommandType, DynamicCommandBuilder, WorkflowInstanceSnapshot};
///
/// let parent = WorkflowInstanceSnapshot::new(CommandType::StartProcess);
/// let command = DynamicCommandBuilder::new(&parent)
///     .definition(1001, 3)
///     .parameter("date", "2024-01-01")
///     .build()
///     .unwrap();
/// assert_eq!(command.command_type, CommandType::DynamicGeneration);
/// ```
#[derive(Debug, Clone)]
pub struct DynamicCommandBuilder<'a> {
    parent: &'a WorkflowInstanceSnapshot,
    definition_code: Option<i64>,
    definition_version: Option<i32>,
    parameters: ParameterMap,
}

impl<'a> DynamicCommandBuilder<'a> {
    pub fn new(parent: &'a WorkflowInstanceSnapshot) -> Self {
        DynamicCommandBuilder {
            parent,
            definition_code: None,
            definition_version: None,
            parameters: ParameterMap::new(),
        }
    }

    pub fn definition(self, code: i64, version: i32) -> Self {
        self.definition_code(code).definition_version(version)
    }

    pub fn definition_code(mut self, code: i64) -> Self {
        self.definition_code = Some(code);
        self
    }

    pub fn definition_version(mut self, version: i32) -> Self {
        self.definition_version = Some(version);
        self
    }

    /// Replace the caller-supplied parameters.
    pub fn parameters(mut self, parameters: ParameterMap) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn parameter<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<CommandDescriptor, AppError> {
        create_command(
            self.parent,
            self.definition_code,
            self.definition_version,
            self.parameters,
        )
    }
}

/// Derive a command for sub-workflow `(definition_code, definition_version)`.
///
/// Parent global parameters override caller parameters of the same name. The
/// command records the merged parameters and a dynamic-generation tag in its
/// metadata. Fails with a validation error when either half of the target
/// identity is missing, and with a serialization error when the parent's
/// global parameters are not a JSON property list.
pub fn create_command(
    parent: &WorkflowInstanceSnapshot,
    definition_code: Option<i64>,
    definition_version: Option<i32>,
    mut parameters: ParameterMap,
) -> Result<CommandDescriptor, AppError> {
    let definition_code = definition_code.ok_or_else(|| {
        AppError::invalid_argument("Sub-workflow definition code is required")
            .with_code("CMD-001")
    })?;
    let definition_version = definition_version.ok_or_else(|| {
        AppError::invalid_argument("Sub-workflow definition version is required")
            .with_code("CMD-002")
            .with_context(format!("definition_code={}", definition_code))
    })?;

    let command_type = derived_command_type(parent.command_type);
    let mut command = CommandDescriptor::new(command_type, definition_code, definition_version);
    command.task_depend_type = TaskDependType::TaskPost;
    command.failure_strategy = parent.failure_strategy;
    command.warning_type = parent.warning_type;

    let merged = merge_global_params(&mut parameters, parent.global_params.as_deref())?;
    let start_params = serde_json::to_string(&parameters)?;
    command.put_command_param(CMD_PARAM_START_PARAMS, start_params);
    command.put_command_param(
        CMD_COMMAND_TYPE_PARAMS,
        CommandType::DynamicGeneration.as_str(),
    );

    command.executor_id = parent.executor_id;
    command.warning_group_id = parent.warning_group_id;
    command.workflow_instance_priority = parent.workflow_instance_priority;
    command.worker_group = parent.worker_group.clone();
    command.dry_run = parent.dry_run;
    command.tenant_code = parent.tenant_code.clone();

    tracing::debug!(
        parent_instance = ?parent.id,
        parent_command_type = %parent.command_type,
        command_type = %command.command_type,
        definition_code,
        definition_version,
        global_params_merged = merged,
        start_params = parameters.len(),
        "derived sub-workflow command"
    );

    Ok(command)
}

/// Command type of a command derived from a parent started with `parent`.
///
/// A fresh user-started run becomes a generated command; re-runs, recoveries
/// and scheduled runs keep their trigger kind downstream.
pub fn derived_command_type(parent: CommandType) -> CommandType {
    match parent {
        CommandType::StartProcess => CommandType::DynamicGeneration,
        CommandType::StartCurrentTaskProcess
        | CommandType::RecoverToleranceFaultProcess
        | CommandType::RecoverSuspendedProcess
        | CommandType::StartFailureTaskProcess
        | CommandType::ComplementData
        | CommandType::Scheduler
        | CommandType::RepeatRunning
        | CommandType::Pause
        | CommandType::Stop
        | CommandType::RecoverWaitingThread
        | CommandType::RecoverSerialWait
        | CommandType::ExecuteTask
        | CommandType::DynamicGeneration => parent,
    }
}

/// Decode a global-parameter blob. Blank, absent and `null` blobs are empty.
pub fn decode_global_params(raw: Option<&str>) -> Result<Vec<Property>, AppError> {
    let raw = match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(Vec::new()),
    };
    let properties: Option<Vec<Property>> = serde_json::from_str(raw).map_err(|e| {
        AppError::malformed_data(
            format!("Global params are not a JSON property list: {}", e),
            e,
        )
        .with_code("PARAM-004")
    })?;
    Ok(properties.unwrap_or_default())
}

/// Write every parent global parameter into `parameters`, in list order.
///
/// Existing entries with the same name are overwritten, so a repeated name in
/// the parent list resolves to its last value. A property without a value
/// merges as the empty string. Returns the number of properties applied.
pub fn merge_global_params(
    parameters: &mut ParameterMap,
    global_params: Option<&str>,
) -> Result<usize, AppError> {
    let properties = decode_global_params(global_params)?;
    let applied = properties.len();
    for property in properties {
        parameters.insert(property.prop, property.value.unwrap_or_default());
    }
    Ok(applied)
}
