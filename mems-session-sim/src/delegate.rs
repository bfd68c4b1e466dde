use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;

use mems_session_core::{ExportReport, SessionDelegate, SessionError, SessionState, StageKey};

/// Forwards session events to the log and keeps the errors for the
/// end-of-run summary.
#[derive(Default)]
pub struct LogDelegate {
    errors: Mutex<Vec<String>>,
}

impl LogDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }
}

impl SessionDelegate for LogDelegate {
    fn on_state_changed(&self, state: SessionState) {
        log::info!("Session state: {}", state.name());
    }

    fn on_stage_recorded(&self, key: StageKey, at: DateTime<Utc>) {
        log::info!("{} at {}", key, at.to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    fn on_error(&self, error: &SessionError) {
        log::error!("Session error: {}", error);
        self.errors.lock().push(error.to_string());
    }

    fn on_export_finished(&self, report: &ExportReport) {
        log::info!(
            "Exported session {} ({} rows, sha256 {})",
            report.session_id,
            report.row_count,
            report.checksum
        );
    }
}
