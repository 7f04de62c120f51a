use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating game settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid {width}x{height} is not playable: {reason}")]
    InvalidGrid {
        width: u16,
        height: u16,
        reason: &'static str,
    },

    #[error("tick rate {0} is outside 1..=120 ticks per second")]
    InvalidTickRate(u32),
}

/// Top-level error for one game session.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}
