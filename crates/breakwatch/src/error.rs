use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("operation failed")]
    Operation(#[from] breakwatch_operations::OperationError),

    #[error("failed to read metadata snapshot")]
    Meta(#[from] breakwatch_meta::MetaError),

    #[error("failed to serialize output")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("no command table given; pass --command-table or set collect.command-table in {config}")]
    MissingCommandTable { config: &'static str },

    #[error("{count} breaking change(s) found")]
    BreakingChangesFound { count: usize },
}

pub type Result<T> = std::result::Result<T, CliError>;
