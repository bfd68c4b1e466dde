use std::path::Path;

use crate::models::error::SessionError;

/// Hands a finished archive to the system share/export mechanism.
pub trait ArchiveTransport: Send + Sync {
    fn share(&self, path: &Path) -> Result<(), SessionError>;
}
