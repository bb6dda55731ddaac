mod config;
mod error;
pub mod model;
pub mod operations;
pub mod pipeline;
pub mod providers;
mod render;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use config::{BreakwatchConfig, DEFAULT_CONFIG_FILE, load_config, parse_config};
pub use error::{OperationError, Result};
pub use render::render_markdown;
