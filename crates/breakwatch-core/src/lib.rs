pub mod error;
pub mod types;
mod version;

pub use error::*;
pub use types::*;
pub use version::{PreLabel, PreRelease, ReleaseVersion};
