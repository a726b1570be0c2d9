use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the configuration and lifecycle operations of a
/// `Logger` and by the backend factory. Emission never returns an error.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown logging backend: {0:?}")]
    UnknownBackend(String),
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),
    #[error("unable to open log file {}: {source}", .path.display())]
    Path {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("log rotation failed for {}: {source}", .path.display())]
    Rotation {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to flush log output: {0}")]
    Io(#[source] std::io::Error),
}
