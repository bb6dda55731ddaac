use crate::Result;
use crate::model::{ArgumentTable, LoadedCommands};

/// The host framework's command loader.
pub trait CommandLoader: Send + Sync {
    /// Loads the full command and command-group tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot load its commands. Loading twice
    /// within one invocation is also an error.
    fn load_command_table(&self) -> Result<LoadedCommands>;

    /// Resolves the complete argument definitions of `command`, including
    /// deprecation metadata the command table may not carry yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the command table has not been loaded.
    fn load_arguments(&self, command: &str) -> Result<ArgumentTable>;
}
