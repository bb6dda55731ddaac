use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::model::{ArgumentTable, LoadedCommands, PathTableEntries};
use crate::traits::{CommandLoader, PathTable};
use crate::{OperationError, Result};

pub struct MockCommandLoader {
    loaded: LoadedCommands,
    load_calls: Arc<AtomicUsize>,
    argument_requests: Mutex<Vec<String>>,
    fail_load: bool,
    fail_arguments: bool,
}

impl MockCommandLoader {
    #[must_use]
    pub fn new(loaded: LoadedCommands) -> Self {
        Self {
            loaded,
            load_calls: Arc::new(AtomicUsize::new(0)),
            argument_requests: Mutex::new(Vec::new()),
            fail_load: false,
            fail_arguments: false,
        }
    }

    #[must_use]
    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    #[must_use]
    pub fn failing_arguments(mut self) -> Self {
        self.fail_arguments = true;
        self
    }

    /// Shared counter of `load_command_table` calls, readable after the
    /// loader has been moved into an operation.
    #[must_use]
    pub fn load_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.load_calls)
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn argument_requests(&self) -> Vec<String> {
        self.argument_requests.lock().expect("lock poisoned").clone()
    }
}

impl CommandLoader for MockCommandLoader {
    fn load_command_table(&self) -> Result<LoadedCommands> {
        let previous = self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_load {
            return Err(OperationError::CommandTableRead {
                path: PathBuf::from("mock"),
                source: std::io::Error::other("mock load failure"),
            });
        }
        if previous > 0 {
            return Err(OperationError::CommandTableReloaded);
        }
        Ok(self.loaded.clone())
    }

    fn load_arguments(&self, command: &str) -> Result<ArgumentTable> {
        self.argument_requests
            .lock()
            .expect("lock poisoned")
            .push(command.to_string());

        if self.fail_arguments {
            return Err(OperationError::CommandTableNotLoaded {
                command: command.to_string(),
            });
        }

        Ok(self
            .loaded
            .modules
            .iter()
            .find_map(|module| module.command_table.get(command))
            .map(|info| info.arguments.clone())
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MockPathTable {
    entries: PathTableEntries,
}

impl MockPathTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_core(mut self, name: &str) -> Self {
        self.entries
            .core
            .insert(name.to_string(), PathBuf::from(name));
        self
    }

    #[must_use]
    pub fn with_module(mut self, name: &str) -> Self {
        self.entries
            .modules
            .insert(name.to_string(), PathBuf::from("modules").join(name));
        self
    }

    #[must_use]
    pub fn with_extension(mut self, name: &str) -> Self {
        self.entries
            .extensions
            .insert(name.to_string(), PathBuf::from("extensions").join(name));
        self
    }
}

impl PathTable for MockPathTable {
    fn path_table(&self, include_only: Option<&[String]>) -> Result<PathTableEntries> {
        let mut entries = self.entries.clone();
        if let Some(names) = include_only {
            entries.core.retain(|name, _| names.contains(name));
            entries.modules.retain(|name, _| names.contains(name));
            entries.extensions.retain(|name, _| names.contains(name));
        }
        Ok(entries)
    }
}
