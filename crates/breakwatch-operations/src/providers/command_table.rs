use std::path::PathBuf;
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::model::{ArgumentTable, LoadedCommands};
use crate::traits::CommandLoader;
use crate::{OperationError, Result};

/// On-disk dump of a host's loaded command table.
///
/// `arguments` holds the fully resolved argument tables keyed by command
/// name; commands missing from it fall back to the arguments embedded in the
/// command table.
#[derive(Debug, Deserialize)]
struct CommandTableDump {
    #[serde(flatten)]
    loaded: LoadedCommands,
    #[serde(default)]
    arguments: IndexMap<String, ArgumentTable>,
}

/// Loads the command table from a JSON dump, at most once.
pub struct FileSystemCommandLoader {
    path: PathBuf,
    arguments: OnceLock<IndexMap<String, ArgumentTable>>,
}

impl FileSystemCommandLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            arguments: OnceLock::new(),
        }
    }

    fn read_dump(&self) -> Result<CommandTableDump> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| OperationError::CommandTableRead {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| OperationError::CommandTableParse {
            path: self.path.clone(),
            source,
        })
    }
}

fn index_arguments(
    loaded: &LoadedCommands,
    mut resolved: IndexMap<String, ArgumentTable>,
) -> IndexMap<String, ArgumentTable> {
    let mut index = IndexMap::new();
    for module in &loaded.modules {
        for (name, info) in &module.command_table {
            let arguments = resolved
                .shift_remove(name)
                .unwrap_or_else(|| info.arguments.clone());
            index.insert(name.clone(), arguments);
        }
    }
    index
}

impl CommandLoader for FileSystemCommandLoader {
    fn load_command_table(&self) -> Result<LoadedCommands> {
        if self.arguments.get().is_some() {
            return Err(OperationError::CommandTableReloaded);
        }

        let dump = self.read_dump()?;
        let index = index_arguments(&dump.loaded, dump.arguments);
        self.arguments
            .set(index)
            .map_err(|_| OperationError::CommandTableReloaded)?;

        debug!(
            path = %self.path.display(),
            modules = dump.loaded.modules.len(),
            "loaded command table dump"
        );
        Ok(dump.loaded)
    }

    fn load_arguments(&self, command: &str) -> Result<ArgumentTable> {
        let index = self
            .arguments
            .get()
            .ok_or_else(|| OperationError::CommandTableNotLoaded {
                command: command.to_string(),
            })?;

        Ok(index.get(command).cloned().unwrap_or_default())
    }
}
