use thiserror::Error;

use super::stage::StageKey;

/// Errors that can occur while running or exporting a capture session.
///
/// Every variant is raised at the boundary where the failing device or
/// storage call was issued. None of them roll back state that was already
/// applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available: {0}")]
    DeviceUnavailable(String),

    #[error("device operation failed: {0}")]
    DeviceOperationFailure(String),

    #[error("storage write failed: {0}")]
    StorageWriteFailure(String),

    #[error("transport failed: {0}")]
    TransportFailure(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("stage already recorded: {0}")]
    DuplicateStage(StageKey),
}
