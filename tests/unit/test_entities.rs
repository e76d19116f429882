use dyncmd::core::{
    CommandDescriptor, CommandType, DataType, Direct, FailureStrategy, Priority, Property,
    TaskDependType, WarningType, WorkflowInstanceSnapshot, CMD_COMMAND_TYPE_PARAMS,
    CMD_PARAM_START_PARAMS,
};

#[test]
fn test_new_descriptor_defaults() {
    let command = CommandDescriptor::new(CommandType::ExecuteTask, 42, 2);
    assert_eq!(command.workflow_definition_code, 42);
    assert_eq!(command.workflow_definition_version, 2);
    assert_eq!(command.workflow_instance_id, 0);
    assert_eq!(command.task_depend_type, TaskDependType::TaskPost);
    assert_eq!(command.failure_strategy, FailureStrategy::Continue);
    assert_eq!(command.warning_type, WarningType::None);
    assert_eq!(command.workflow_instance_priority, Priority::Medium);
    assert_eq!(command.worker_group, "default");
    assert_eq!(command.tenant_code, "default");
    assert!(command.command_params().is_empty());
    assert_eq!(command.start_time, command.update_time);
}

#[test]
fn test_descriptor_metadata_is_json_text_on_the_wire() {
    let mut command = CommandDescriptor::new(CommandType::Scheduler, 1, 1);
    command.put_command_param("k", "v");

    let value = serde_json::to_value(&command).unwrap();
    assert_eq!(value["command_param"], serde_json::json!("{\"k\":\"v\"}"));
    assert_eq!(value["command_type"], serde_json::json!("SCHEDULER"));
    assert_eq!(value["task_depend_type"], serde_json::json!("TASK_POST"));

    let decoded: CommandDescriptor = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, command);
}

#[test]
fn test_start_params_read_back() {
    let mut command = CommandDescriptor::new(CommandType::Scheduler, 1, 1);
    assert_eq!(command.start_params().unwrap(), None);

    command.put_command_param(CMD_PARAM_START_PARAMS, r#"{"b":"2","a":"1"}"#);
    let params = command.start_params().unwrap().unwrap();
    assert_eq!(
        params.iter().collect::<Vec<_>>(),
        vec![
            (&"b".to_string(), &"2".to_string()),
            (&"a".to_string(), &"1".to_string())
        ]
    );
}

#[test]
fn test_start_params_malformed_is_serialization_error() {
    let mut command = CommandDescriptor::new(CommandType::Scheduler, 1, 1);
    command.put_command_param(CMD_PARAM_START_PARAMS, "[1,2]");
    let err = command.start_params().unwrap_err();
    assert!(err.is_malformed_data());
    assert_eq!(err.code, "PARAM-003");
}

#[test]
fn test_dynamic_generation_tag() {
    let mut command = CommandDescriptor::new(CommandType::Scheduler, 1, 1);
    assert!(!command.is_dynamically_generated());
    command.put_command_param(CMD_COMMAND_TYPE_PARAMS, "DYNAMIC_GENERATION");
    assert!(command.is_dynamically_generated());
    assert_eq!(command.command_type, CommandType::Scheduler);
}

#[test]
fn test_property_wire_format() {
    let property: Property =
        serde_json::from_str(r#"{"prop":"n","direct":"OUT","type":"INTEGER","value":5}"#).unwrap();
    assert_eq!(property.prop, "n");
    assert_eq!(property.direct, Direct::Out);
    assert_eq!(property.data_type, DataType::Integer);
    assert_eq!(property.value.as_deref(), Some("5"));

    let bare: Property = serde_json::from_str(r#"{"prop":"m"}"#).unwrap();
    assert_eq!(bare.direct, Direct::In);
    assert_eq!(bare.value, None);
}

#[test]
fn test_snapshot_with_global_properties() {
    let snapshot = WorkflowInstanceSnapshot::new(CommandType::StartProcess)
        .with_global_properties(&[Property::new("a", "1"), Property::new("b", "2")])
        .unwrap();
    let raw = snapshot.global_params.unwrap();
    let decoded: Vec<Property> = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[1].prop, "b");
    assert_eq!(decoded[1].value.as_deref(), Some("2"));
}

#[test]
fn test_snapshot_requires_command_type() {
    let result: Result<WorkflowInstanceSnapshot, _> = serde_json::from_str("{}");
    assert!(result.is_err());
}
