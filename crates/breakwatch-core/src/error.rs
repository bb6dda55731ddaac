use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: &'static str },

    #[error("invalid version '{input}'")]
    Semver {
        input: String,
        #[source]
        source: semver::Error,
    },

    #[error("cannot bump the {segment} segment of version '{version}' any further")]
    Overflow {
        version: String,
        segment: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
