use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("failed to read metadata snapshot '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metadata snapshot '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
