use std::path::PathBuf;

/// Serialized artifacts for one completed session.
///
/// Derived on stop, handed to storage, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub csv: String,
    pub json: String,
    pub audio: Vec<u8>,
    pub archive: Vec<u8>,
}

/// Result returned when a session stops and its bundle has been shared.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub session_id: String,
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
    pub archive_path: PathBuf,
    /// Data rows in `mems.csv` (header excluded).
    pub row_count: usize,
    /// SHA-256 hex digest of the archive bytes.
    pub checksum: String,
    pub exported_at: String,
}
