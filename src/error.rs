use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ConfigError, ConfigFileError};

/// Failures that abort the binary before or outside a running round.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("config file {path} not found")]
    ConfigNotFound { path: PathBuf },
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Attaches the offending path to a config file failure.
    #[must_use]
    pub fn from_config_file(path: &Path, error: ConfigFileError) -> Self {
        let path = path.to_path_buf();
        match error {
            ConfigFileError::Read(source) => Self::ConfigRead { path, source },
            ConfigFileError::Parse(source) => Self::ConfigParse { path, source },
        }
    }
}
