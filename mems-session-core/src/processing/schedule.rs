use std::time::{Duration, Instant};

use crate::models::config::SessionConfig;
use crate::models::error::SessionError;
use crate::models::stage::Stage;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledStage {
    offset: Duration,
    stage: Stage,
    fired: bool,
}

/// Deferred stages anchored at the session start instant.
///
/// Each entry fires at most once, when `due` is polled at or after
/// `anchor + offset`. Offsets are independent of each other; they are not
/// chained. Entries must be given in strictly increasing offset order.
#[derive(Debug, Clone)]
pub struct StageSchedule {
    anchor: Instant,
    entries: Vec<ScheduledStage>,
}

impl StageSchedule {
    pub fn new(anchor: Instant, stages: &[(Duration, Stage)]) -> Result<Self, SessionError> {
        for pair in stages.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(SessionError::ConfigurationFailed(format!(
                    "stage {} at {}ms must come after {} at {}ms",
                    pair[1].1,
                    pair[1].0.as_millis(),
                    pair[0].1,
                    pair[0].0.as_millis()
                )));
            }
        }

        let entries = stages
            .iter()
            .map(|&(offset, stage)| ScheduledStage {
                offset,
                stage,
                fired: false,
            })
            .collect();
        Ok(Self { anchor, entries })
    }

    /// Haptic cue at `haptic_delay`, audio capture at `audio_delay`.
    pub fn from_config(anchor: Instant, config: &SessionConfig) -> Result<Self, SessionError> {
        Self::new(
            anchor,
            &[
                (config.haptic_delay, Stage::Haptic),
                (config.audio_delay, Stage::AudioCapture),
            ],
        )
    }

    /// Stages whose offset has elapsed at `now`, in offset order. Marks them fired.
    pub fn due(&mut self, now: Instant) -> Vec<Stage> {
        let elapsed = now.saturating_duration_since(self.anchor);
        self.entries
            .iter_mut()
            .filter(|entry| !entry.fired && entry.offset <= elapsed)
            .map(|entry| {
                entry.fired = true;
                entry.stage
            })
            .collect()
    }

    /// Instant at which the next unfired stage becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .iter()
            .find(|entry| !entry.fired)
            .map(|entry| self.anchor + entry.offset)
    }

    pub fn has_fired(&self, stage: Stage) -> bool {
        self.entries.iter().any(|entry| entry.stage == stage && entry.fired)
    }

    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.fired).count()
    }
}
