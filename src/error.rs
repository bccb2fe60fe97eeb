use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The enumeration collaborator could not produce a snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("process enumeration is not supported on this platform")]
    Unsupported,
    #[error("process enumeration failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("no processes to encode")]
    NoProcesses,
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("couldn't compress process list")]
    Compress(#[source] io::Error),
    #[error("couldn't serialize envelope")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to serialize event")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write event")]
    Io(#[from] io::Error),
}

/// Why a sampling cycle produced no event.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("couldn't get process list")]
    Source(#[from] SourceError),
    #[error("failed to encode process list")]
    Encode(#[from] EncodeError),
    #[error("failed to package process list")]
    Package(#[from] PackageError),
    #[error("failed to emit process list event")]
    Emit(#[from] SinkError),
}
