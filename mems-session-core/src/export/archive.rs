use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::models::error::SessionError;

pub const AUDIO_ENTRY: &str = "audio.m4a";
pub const CSV_ENTRY: &str = "mems.csv";
pub const INFO_ENTRY: &str = "info.json";

/// Build the session archive in memory.
///
/// Layout:
/// ```text
/// session.zip
/// ├── audio.m4a   (raw audio bytes, possibly empty)
/// ├── mems.csv
/// └── info.json
/// ```
///
/// Entries are stored uncompressed with a fixed 1980-01-01 modification
/// time, so identical inputs produce identical archive bytes.
pub fn build_archive(audio: &[u8], csv: &str, info_json: &str) -> Result<Vec<u8>, SessionError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default());

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, payload) in [
        (AUDIO_ENTRY, audio),
        (CSV_ENTRY, csv.as_bytes()),
        (INFO_ENTRY, info_json.as_bytes()),
    ] {
        writer
            .start_file(name, options)
            .map_err(|e| SessionError::StorageWriteFailure(format!("failed to add {} to archive: {}", name, e)))?;
        writer
            .write_all(payload)
            .map_err(|e| SessionError::StorageWriteFailure(format!("failed to write {} to archive: {}", name, e)))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| SessionError::StorageWriteFailure(format!("failed to finish archive: {}", e)))?;
    Ok(cursor.into_inner())
}
