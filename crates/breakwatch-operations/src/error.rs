use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] breakwatch_core::CoreError),

    #[error(transparent)]
    Meta(#[from] breakwatch_meta::MetaError),

    #[error("failed to read command table '{path}'")]
    CommandTableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse command table '{path}'")]
    CommandTableParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("command table was already loaded for this invocation")]
    CommandTableReloaded,

    #[error("arguments of '{command}' requested before the command table was loaded")]
    CommandTableNotLoaded { command: String },

    #[error("failed to scan module directory '{path}'")]
    ModuleScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;
