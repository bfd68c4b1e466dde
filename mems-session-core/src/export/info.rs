use serde::{Deserialize, Serialize};

use crate::models::config::SessionConfig;
use crate::models::error::SessionError;
use crate::models::stage::StageKey;
use crate::processing::ledger::{format_instant, TimestampLedger};

/// Contents of `info.json`: configured delays plus every recorded stage.
///
/// Stage fields are omitted when the stage never fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub delay_before_vibration: u64,
    pub delay_before_audio: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mems_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vibration_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audio_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audio_start_command_end: Option<String>,
}

impl SessionInfo {
    pub fn new(config: &SessionConfig, ledger: &TimestampLedger) -> Self {
        let stamp = |key: StageKey| ledger.get(key).map(|at| format_instant(&at));
        Self {
            delay_before_vibration: config.haptic_delay.as_millis() as u64,
            delay_before_audio: config.audio_delay.as_millis() as u64,
            mems_start_time: stamp(StageKey::MemsStart),
            vibration_time: stamp(StageKey::Vibration),
            audio_start_time: stamp(StageKey::AudioStart),
            audio_start_command_end: stamp(StageKey::AudioStartCommandEnd),
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SessionError::StorageWriteFailure(format!("failed to serialize session info: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    #[test]
    fn omits_stages_that_never_fired() {
        let mut ledger = TimestampLedger::new();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        ledger.record(StageKey::MemsStart, start).unwrap();
        ledger
            .record(StageKey::Vibration, start + chrono::Duration::milliseconds(2001))
            .unwrap();

        let json = SessionInfo::new(&SessionConfig::default(), &ledger).to_json().unwrap();
        assert_eq!(
            json,
            "{\n  \"delayBeforeVibration\": 2000,\n  \"delayBeforeAudio\": 3000,\n  \"memsStartTime\": \"2024-05-01T09:30:00.000Z\",\n  \"vibrationTime\": \"2024-05-01T09:30:02.001Z\"\n}"
        );
    }

    #[test]
    fn includes_every_recorded_stage_in_lifecycle_order() {
        let mut ledger = TimestampLedger::new();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        for (i, key) in StageKey::ALL.iter().enumerate() {
            ledger
                .record(*key, start + chrono::Duration::milliseconds(i as i64 * 1000))
                .unwrap();
        }
        let config = SessionConfig {
            haptic_delay: Duration::from_millis(1000),
            audio_delay: Duration::from_millis(2500),
            ..Default::default()
        };

        let json = SessionInfo::new(&config, &ledger).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["delayBeforeVibration"], 1000);
        assert_eq!(value["delayBeforeAudio"], 2500);
        assert_eq!(value["audioStartCommandEnd"], "2024-05-01T09:30:03.000Z");

        let positions: Vec<usize> = StageKey::ALL
            .iter()
            .map(|key| json.find(key.as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn round_trips_through_serde() {
        let info = SessionInfo::new(&SessionConfig::default(), &TimestampLedger::new());
        let parsed: SessionInfo = serde_json::from_str(&info.to_json().unwrap()).unwrap();
        assert_eq!(parsed, info);
    }
}
