//! Error types for codestrip

use thiserror::Error;

/// Codestrip error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("Refusing to operate on root directory {0:?}")]
    RootGuard(String),
}

/// Result type alias for codestrip
pub type Result<T> = std::result::Result<T, Error>;
