#![allow(clippy::result_large_err)]

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::command_param::{
    as_json_text, CommandParams, CMD_COMMAND_TYPE_PARAMS, CMD_PARAM_START_PARAMS,
};
use crate::core::error::AppError;

pub use dyncmd_types::{
    CommandType, DataType, Direct, FailureStrategy, Priority, TaskDependType, WarningType,
};

/// Parameter name to value mapping, kept in insertion order.
pub type ParameterMap = IndexMap<String, String>;

const DEFAULT_WORKER_GROUP: &str = "default";
const DEFAULT_TENANT_CODE: &str = "default";

fn default_worker_group() -> String {
    DEFAULT_WORKER_GROUP.to_string()
}

fn default_tenant_code() -> String {
    DEFAULT_TENANT_CODE.to_string()
}

/// Read-only view of the workflow instance that forks a sub-workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowInstanceSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub command_type: CommandType,
    /// JSON list of [`Property`] entries. Files may also inline the list.
    #[serde(default, deserialize_with = "json_text_or_inline")]
    pub global_params: Option<String>,
    #[serde(default)]
    pub failure_strategy: FailureStrategy,
    #[serde(default)]
    pub warning_type: WarningType,
    #[serde(default)]
    pub warning_group_id: Option<i32>,
    #[serde(default)]
    pub executor_id: i32,
    #[serde(default)]
    pub workflow_instance_priority: Priority,
    #[serde(default = "default_worker_group")]
    pub worker_group: String,
    #[serde(default = "default_tenant_code")]
    pub tenant_code: String,
    #[serde(default)]
    pub dry_run: bool,
}

impl WorkflowInstanceSnapshot {
    pub fn new(command_type: CommandType) -> Self {
        WorkflowInstanceSnapshot {
            id: None,
            name: None,
            command_type,
            global_params: None,
            failure_strategy: FailureStrategy::default(),
            warning_type: WarningType::default(),
            warning_group_id: None,
            executor_id: 0,
            workflow_instance_priority: Priority::default(),
            worker_group: default_worker_group(),
            tenant_code: default_tenant_code(),
            dry_run: false,
        }
    }

    /// Replace the global parameters with the encoded form of `properties`.
    pub fn with_global_properties(mut self, properties: &[Property]) -> Result<Self, AppError> {
        let encoded = serde_json::to_string(properties)?;
        self.global_params = Some(encoded);
        Ok(self)
    }
}

/// One global parameter declared on a workflow instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub prop: String,
    #[serde(default)]
    pub direct: Direct,
    #[serde(default, rename = "type")]
    pub data_type: DataType,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub value: Option<String>,
}

impl Property {
    pub fn new<N: Into<String>, V: Into<String>>(prop: N, value: V) -> Self {
        Property {
            prop: prop.into(),
            direct: Direct::In,
            data_type: DataType::Varchar,
            value: Some(value.into()),
        }
    }
}

/// Unit of work handed to the scheduler's command intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub command_type: CommandType,
    pub workflow_definition_code: i64,
    pub workflow_definition_version: i32,
    /// Zero until the scheduler materializes an instance for this command.
    #[serde(default)]
    pub workflow_instance_id: i32,
    #[serde(default, with = "as_json_text")]
    command_param: CommandParams,
    #[serde(default)]
    pub task_depend_type: TaskDependType,
    #[serde(default)]
    pub failure_strategy: FailureStrategy,
    #[serde(default)]
    pub warning_type: WarningType,
    #[serde(default)]
    pub warning_group_id: Option<i32>,
    #[serde(default)]
    pub executor_id: i32,
    #[serde(default)]
    pub workflow_instance_priority: Priority,
    #[serde(default = "default_worker_group")]
    pub worker_group: String,
    #[serde(default = "default_tenant_code")]
    pub tenant_code: String,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub test_flag: bool,
    pub start_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl CommandDescriptor {
    pub fn new(command_type: CommandType, definition_code: i64, definition_version: i32) -> Self {
        let now = Utc::now();
        CommandDescriptor {
            command_type,
            workflow_definition_code: definition_code,
            workflow_definition_version: definition_version,
            workflow_instance_id: 0,
            command_param: CommandParams::default(),
            task_depend_type: TaskDependType::default(),
            failure_strategy: FailureStrategy::default(),
            warning_type: WarningType::default(),
            warning_group_id: None,
            executor_id: 0,
            workflow_instance_priority: Priority::default(),
            worker_group: default_worker_group(),
            tenant_code: default_tenant_code(),
            dry_run: false,
            test_flag: false,
            start_time: now,
            update_time: now,
        }
    }

    pub fn command_params(&self) -> &CommandParams {
        &self.command_param
    }

    pub fn command_param_value(&self, key: &str) -> Option<&str> {
        self.command_param.get(key)
    }

    /// Set one metadata key; other keys are preserved.
    pub fn put_command_param<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.command_param.put(key, value);
    }

    /// Decode the merged start parameters, if the command carries any.
    pub fn start_params(&self) -> Result<Option<ParameterMap>, AppError> {
        match self.command_param.get(CMD_PARAM_START_PARAMS) {
            Some(raw) => {
                let params = serde_json::from_str(raw).map_err(|e| {
                    AppError::malformed_data(format!("Start params are not a JSON object: {}", e), e)
                        .with_code("PARAM-003")
                })?;
                Ok(Some(params))
            }
            None => Ok(None),
        }
    }

    /// True when the command was produced by runtime sub-workflow generation,
    /// whatever its command type says.
    pub fn is_dynamically_generated(&self) -> bool {
        self.command_param.get(CMD_COMMAND_TYPE_PARAMS)
            == Some(CommandType::DynamicGeneration.as_str())
    }
}

fn json_text_or_inline<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(inline) => Ok(Some(inline.to_string())),
    }
}

fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Ok(Some(other.to_string())),
    }
}
