use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{MetaError, Result};

/// The command surface of one module at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub commands: IndexMap<String, CommandMeta>,
    #[serde(default)]
    pub sub_groups: IndexMap<String, GroupMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub commands: IndexMap<String, CommandMeta>,
    #[serde(default)]
    pub sub_groups: IndexMap<String, GroupMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterMeta>,
    /// Everything else recorded for the command (`is_aaz`, `deprecate_info`, ...).
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterMeta {
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// `required`, `type`, `id_part`, `choices`, `default`, ...
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ParameterMeta {
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.properties.get("required") == Some(&Value::Bool(true))
    }
}

/// # Errors
///
/// Returns [`MetaError::Read`] if the file cannot be read and
/// [`MetaError::Parse`] if it is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<MetaSnapshot> {
    let content = std::fs::read_to_string(path).map_err(|source| MetaError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| MetaError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
