// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside the simulation kernel: parameter checks, scenario
/// files and exports. `simulate` itself never fails.
#[derive(Debug, Error)]
pub enum WaitlistError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("failed to read scenario file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("a comparison needs at least one scenario")]
    NoScenarios,

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WaitlistError>;
