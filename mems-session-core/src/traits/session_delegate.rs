use chrono::{DateTime, Utc};

use crate::models::error::SessionError;
use crate::models::export::ExportReport;
use crate::models::stage::StageKey;
use crate::models::state::SessionState;

/// Event delegate for session notifications.
///
/// All methods are called from the controller's thread. UI layers use
/// `on_state_changed` to enable `StartSession` only while idle and
/// `StopAndShare` only while active.
pub trait SessionDelegate: Send + Sync {
    /// Called when the controller state changes.
    fn on_state_changed(&self, state: SessionState);

    /// Called after a lifecycle instant is written to the ledger.
    fn on_stage_recorded(&self, key: StageKey, at: DateTime<Utc>);

    /// Called when a device or storage call fails.
    fn on_error(&self, error: &SessionError);

    /// Called when the archive has been handed to the transport.
    fn on_export_finished(&self, report: &ExportReport);
}
