use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::error::SessionError;
use crate::models::stage::StageKey;

/// Format an instant as ISO-8601 UTC with millisecond precision,
/// e.g. `2024-05-01T09:30:00.250Z`.
pub fn format_instant(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Write-once record of session lifecycle instants, in insertion order.
///
/// Diagnostic only: stage scheduling never reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimestampLedger {
    entries: Vec<(StageKey, DateTime<Utc>)>,
}

impl TimestampLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` at `at`. Fails if `key` was already recorded.
    pub fn record(&mut self, key: StageKey, at: DateTime<Utc>) -> Result<(), SessionError> {
        if self.contains(key) {
            return Err(SessionError::DuplicateStage(key));
        }
        if let Some((previous, previous_at)) = self.entries.last() {
            if at < *previous_at {
                log::warn!(
                    "wall clock went backwards: {} at {} precedes {} at {}",
                    key,
                    format_instant(&at),
                    previous,
                    format_instant(previous_at)
                );
            }
        }
        self.entries.push((key, at));
        Ok(())
    }

    pub fn get(&self, key: StageKey) -> Option<DateTime<Utc>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, at)| *at)
    }

    pub fn contains(&self, key: StageKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn entries(&self) -> &[(StageKey, DateTime<Utc>)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
