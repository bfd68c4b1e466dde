use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::export::archive::build_archive;
use crate::export::csv::build_mems_csv;
use crate::export::info::SessionInfo;
use crate::models::config::SessionConfig;
use crate::models::error::SessionError;
use crate::models::export::{ExportBundle, ExportReport};
use crate::processing::ledger::{format_instant, TimestampLedger};
use crate::processing::stream_buffer::SensorStreamBuffer;
use crate::traits::archive_transport::ArchiveTransport;
use crate::traits::durable_store::DurableStore;

pub const CSV_FILE_NAME: &str = "mems.csv";
pub const INFO_FILE_NAME: &str = "info.json";
pub const ARCHIVE_FILE_NAME: &str = "session.zip";

/// Everything a stopped session hands to the bundler.
pub struct ExportInput<'a> {
    pub session_id: &'a str,
    pub config: &'a SessionConfig,
    pub gyroscope: &'a SensorStreamBuffer,
    pub accelerometer: &'a SensorStreamBuffer,
    pub ledger: &'a TimestampLedger,
    /// Location of the finalized recording, if the audio stage produced one.
    pub audio_path: Option<&'a Path>,
    /// Wall-clock instant stamped on the report.
    pub exported_at: DateTime<Utc>,
}

/// Serializes a stopped session and hands the archive to the transport.
///
/// Steps run strictly in sequence and the first failure aborts the rest:
/// ```text
/// read audio → mems.csv → info.json → session.zip
///     → write mems.csv → write info.json → write session.zip → share
/// ```
/// Files written before a failure are left in place.
pub struct ExportBundler {
    store: Arc<dyn DurableStore>,
    transport: Arc<dyn ArchiveTransport>,
}

impl ExportBundler {
    pub fn new(store: Arc<dyn DurableStore>, transport: Arc<dyn ArchiveTransport>) -> Self {
        Self { store, transport }
    }

    /// Build the three artifacts and the archive without persisting anything.
    pub fn assemble(&self, input: &ExportInput<'_>) -> Result<ExportBundle, SessionError> {
        let audio = match input.audio_path {
            Some(path) => self.store.read_binary(path).inspect_err(|e| {
                log::error!("Failed to read audio from {}: {}", path.display(), e);
            })?,
            None => Vec::new(),
        };

        let csv = build_mems_csv(input.gyroscope.samples(), input.accelerometer.samples());
        let json = SessionInfo::new(input.config, input.ledger).to_json()?;
        let archive = build_archive(&audio, &csv, &json).inspect_err(|e| {
            log::error!("Failed to build archive: {}", e);
        })?;

        Ok(ExportBundle {
            csv,
            json,
            audio,
            archive,
        })
    }

    /// Assemble, persist and share. Runs once per stopped session.
    pub fn export(&self, input: &ExportInput<'_>) -> Result<ExportReport, SessionError> {
        let bundle = self.assemble(input)?;

        let csv_path = self.store.location(CSV_FILE_NAME);
        let json_path = self.store.location(INFO_FILE_NAME);
        let archive_path = self.store.location(ARCHIVE_FILE_NAME);

        self.store
            .write_text(&csv_path, &bundle.csv)
            .inspect_err(|e| log::error!("Failed to write {}: {}", csv_path.display(), e))?;
        self.store
            .write_text(&json_path, &bundle.json)
            .inspect_err(|e| log::error!("Failed to write {}: {}", json_path.display(), e))?;
        self.store
            .write_binary(&archive_path, &bundle.archive)
            .inspect_err(|e| log::error!("Failed to write {}: {}", archive_path.display(), e))?;

        self.transport
            .share(&archive_path)
            .inspect_err(|e| log::error!("Failed to share {}: {}", archive_path.display(), e))?;

        let report = ExportReport {
            session_id: input.session_id.to_string(),
            csv_path,
            json_path,
            archive_path,
            row_count: input.gyroscope.len(),
            checksum: hex_encode(&Sha256::digest(&bundle.archive)),
            exported_at: format_instant(&input.exported_at),
        };
        log::info!(
            "Session {} exported: {} rows, {} audio bytes, archive {}",
            report.session_id,
            report.row_count,
            bundle.audio.len(),
            report.archive_path.display()
        );
        Ok(report)
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
