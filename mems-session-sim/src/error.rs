use std::path::PathBuf;

use mems_session_core::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("session did not start")]
    NotStarted,

    #[error(transparent)]
    Session(#[from] SessionError),
}
