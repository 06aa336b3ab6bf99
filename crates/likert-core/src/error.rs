use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("ordinal value {value} is outside range [{min}, {max}]")]
    InvalidOrdinal { value: i32, min: f64, max: f64 },

    #[error("invalid scale range: min {min} must be below max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config_version {found} is newer than this build supports ({supported})")]
    UnsupportedConfigVersion { found: u32, supported: u32 },

    #[error("malformed config: {0}")]
    MalformedConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
