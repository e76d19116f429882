use dyncmd::core::{
    command_param_value, merge_command_param, CommandDescriptor, CommandParams, CommandType,
    CMD_COMMAND_TYPE_PARAMS, CMD_PARAM_START_PARAMS,
};

fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new(CommandType::Scheduler, 7, 1)
}

#[test]
fn test_put_then_get_returns_value() {
    let mut command = descriptor();
    command.put_command_param("k1", "v1");
    assert_eq!(command.command_param_value("k1"), Some("v1"));
}

#[test]
fn test_successive_puts_keep_earlier_keys() {
    let mut command = descriptor();
    command.put_command_param("k1", "v1");
    command.put_command_param("k2", "v2");
    assert_eq!(command.command_param_value("k1"), Some("v1"));
    assert_eq!(command.command_param_value("k2"), Some("v2"));
    assert_eq!(command.command_params().len(), 2);
}

#[test]
fn test_put_overwrites_only_its_key() {
    let mut command = descriptor();
    command.put_command_param("k1", "v1");
    command.put_command_param("k2", "v2");
    command.put_command_param("k1", "v3");
    assert_eq!(command.command_param_value("k1"), Some("v3"));
    assert_eq!(command.command_param_value("k2"), Some("v2"));
}

#[test]
fn test_get_missing_key_is_absent() {
    let command = descriptor();
    assert_eq!(command.command_param_value(CMD_PARAM_START_PARAMS), None);
}

#[test]
fn test_round_trip_sizes_zero_one_many() {
    let cases: Vec<CommandParams> = vec![
        CommandParams::new(),
        [("only", "one")].into_iter().collect(),
        [("a", "1"), ("b", "{\"x\":\"y\"}"), ("c", "")]
            .into_iter()
            .collect(),
    ];

    for params in cases {
        let encoded = params.to_json().unwrap();
        let decoded = CommandParams::from_json(Some(&encoded)).unwrap();
        assert_eq!(decoded, params);
        assert_eq!(
            decoded.iter().collect::<Vec<_>>(),
            params.iter().collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_empty_map_encodes_as_empty_object() {
    assert_eq!(CommandParams::new().to_json().unwrap(), "{}");
}

#[test]
fn test_raw_get_on_blank_blob_is_absent() {
    assert_eq!(command_param_value(None, "k").unwrap(), None);
    assert_eq!(command_param_value(Some(""), "k").unwrap(), None);
}

#[test]
fn test_raw_get_on_malformed_blob_fails() {
    let err = command_param_value(Some("{\"k\":"), "k").unwrap_err();
    assert!(err.is_malformed_data());
}

#[test]
fn test_raw_merge_preserves_unknown_keys() {
    let existing = r#"{"ProcessInstanceId":"12","fatherParams":"{}"}"#;
    let merged = merge_command_param(Some(existing), CMD_COMMAND_TYPE_PARAMS, "DYNAMIC_GENERATION")
        .unwrap();
    assert_eq!(
        merged,
        r#"{"ProcessInstanceId":"12","fatherParams":"{}","commandTypeParams":"DYNAMIC_GENERATION"}"#
    );
}

#[test]
fn test_raw_merge_on_malformed_blob_fails() {
    let err = merge_command_param(Some("not json"), "k", "v").unwrap_err();
    assert!(err.is_malformed_data());
}

#[test]
fn test_descriptor_rejects_malformed_blob_on_read() {
    let mut value = serde_json::to_value(descriptor()).unwrap();
    value["command_param"] = serde_json::Value::String("{broken".to_string());
    let result: Result<CommandDescriptor, _> = serde_json::from_value(value);
    assert!(result.is_err());
}

#[test]
fn test_descriptor_accepts_blank_null_and_inline_blob() {
    for blob in [
        serde_json::Value::String(String::new()),
        serde_json::Value::Null,
        serde_json::json!({"k": "v"}),
    ] {
        let mut value = serde_json::to_value(descriptor()).unwrap();
        value["command_param"] = blob.clone();
        let command: CommandDescriptor = serde_json::from_value(value).unwrap();
        if blob.is_object() {
            assert_eq!(command.command_param_value("k"), Some("v"));
        } else {
            assert!(command.command_params().is_empty());
        }
    }
}

#[test]
fn test_raw_merge_keeps_non_string_entries_unchanged() {
    let merged = merge_command_param(Some(r#"{"a":null,"n":3}"#), "k", "v").unwrap();
    assert_eq!(merged, r#"{"a":null,"n":3,"k":"v"}"#);

    let reloaded = CommandParams::from_json(Some(&merged)).unwrap();
    assert!(reloaded.contains_key("a"));
    assert_eq!(reloaded.get_raw("a"), Some(&serde_json::Value::Null));
    assert_eq!(reloaded.get_raw("n"), Some(&serde_json::json!(3)));
    assert_eq!(reloaded.get("n"), None);
}

#[test]
fn test_put_on_loaded_descriptor_keeps_foreign_entries() {
    let mut value = serde_json::to_value(descriptor()).unwrap();
    value["command_param"] =
        serde_json::json!(r#"{"resumeFlag":null,"retries":3,"nested":{"z":1,"a":[true]}}"#);
    let mut command: CommandDescriptor = serde_json::from_value(value).unwrap();

    command.put_command_param("owner", "team-a");

    let written = serde_json::to_value(&command).unwrap();
    assert_eq!(
        written["command_param"],
        serde_json::json!(
            r#"{"resumeFlag":null,"retries":3,"nested":{"z":1,"a":[true]},"owner":"team-a"}"#
        )
    );
}
