mod diff;
mod error;
mod snapshot;
mod types;

pub use diff::{diff_meta, diff_meta_files};
pub use error::MetaError;
pub use snapshot::{CommandMeta, GroupMeta, MetaSnapshot, ParameterMeta, load_snapshot};
pub use types::{MetaChange, MetaDiff};

pub type Result<T> = std::result::Result<T, MetaError>;
