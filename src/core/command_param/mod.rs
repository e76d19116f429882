#![allow(clippy::result_large_err)]

//! Extensible string-keyed metadata carried on every command.
//!
//! The scheduler stores this map as JSON text in a single field. Callers work
//! with the typed [`CommandParams`] wrapper and only ever add or replace one
//! key at a time, so entries written by other producers survive.
//!
//! A blank or absent blob is an empty map. A non-blank blob that is not a JSON
//! object fails with a serialization error in every entry point.

use crate::core::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata key holding the merged start parameters as a JSON object.
pub const CMD_PARAM_START_PARAMS: &str = "StartParams";
/// Metadata key holding the name of the mechanism that generated the command.
pub const CMD_COMMAND_TYPE_PARAMS: &str = "commandTypeParams";

/// Ordered map persisted as the command's metadata blob.
///
/// Values are strings when written through this API. Entries of any other JSON
/// type written by other producers are carried unchanged and read back as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandParams {
    entries: IndexMap<String, Value>,
}

impl CommandParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a stored blob.
    pub fn from_json(raw: Option<&str>) -> Result<Self, AppError> {
        let raw = match raw.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(Self::default()),
        };
        serde_json::from_str(raw).map_err(|e| {
            AppError::malformed_data(format!("Command param is not a JSON object: {}", e), e)
                .with_code("PARAM-001")
        })
    }

    /// Encode to the stored blob form.
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(&self.entries).map_err(|e| {
            AppError::malformed_data(format!("Failed to encode command param: {}", e), e)
                .with_code("PARAM-002")
        })
    }

    /// String value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Raw JSON value stored under `key`, whatever its type.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Set one key, leaving every other entry untouched. Returns the replaced value.
    pub fn put<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.insert(key.into(), Value::String(value.into()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for CommandParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CommandParams {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }
}

/// Look up one key in a raw metadata blob.
pub fn command_param_value(raw: Option<&str>, key: &str) -> Result<Option<String>, AppError> {
    let params = CommandParams::from_json(raw)?;
    Ok(params.get(key).map(str::to_string))
}

/// Set one key in a raw metadata blob and return the re-encoded blob.
pub fn merge_command_param(raw: Option<&str>, key: &str, value: &str) -> Result<String, AppError> {
    let mut params = CommandParams::from_json(raw)?;
    params.put(key, value);
    params.to_json()
}

/// Serde adapter storing [`CommandParams`] as JSON text inside a document.
///
/// Reading also accepts an inline JSON object or `null`.
pub mod as_json_text {
    use super::CommandParams;
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(params: &CommandParams, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = params.to_json().map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<CommandParams, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(CommandParams::default()),
            Value::String(text) => {
                CommandParams::from_json(Some(&text)).map_err(|e| de::Error::custom(e.message))
            }
            object @ Value::Object(_) => {
                serde_json::from_value(object).map_err(de::Error::custom)
            }
            other => Err(de::Error::custom(format!(
                "command_param must be JSON text or an object, found {}",
                other
            ))),
        }
    }
}
