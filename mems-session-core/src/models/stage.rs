use std::fmt;

use serde::{Deserialize, Serialize};

/// Named lifecycle instant recorded in the timestamp ledger.
///
/// Declaration order is lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StageKey {
    #[serde(rename = "memsStartTime")]
    MemsStart,
    #[serde(rename = "vibrationTime")]
    Vibration,
    #[serde(rename = "audioStartTime")]
    AudioStart,
    #[serde(rename = "audioStartCommandEnd")]
    AudioStartCommandEnd,
}

impl StageKey {
    pub const ALL: [StageKey; 4] = [
        StageKey::MemsStart,
        StageKey::Vibration,
        StageKey::AudioStart,
        StageKey::AudioStartCommandEnd,
    ];

    /// Key name as it appears in `info.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKey::MemsStart => "memsStartTime",
            StageKey::Vibration => "vibrationTime",
            StageKey::AudioStart => "audioStartTime",
            StageKey::AudioStartCommandEnd => "audioStartCommandEnd",
        }
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deferred action fired at a fixed offset from session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Fire the haptic pattern and record `vibrationTime`.
    Haptic,
    /// Prepare and start audio capture.
    AudioCapture,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Haptic => f.write_str("haptic"),
            Stage::AudioCapture => f.write_str("audio-capture"),
        }
    }
}
