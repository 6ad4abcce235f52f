use std::path::PathBuf;
use thiserror::Error;

/// Errors at the IO/config boundary. The core parser never returns a
/// `Result` for malformed deck input — that is data, reported through the
/// diagnostic sink. This type is reserved for genuine environment failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
