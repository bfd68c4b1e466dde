use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::audio::{AudioModeOptions, AudioPreset};
use super::error::SessionError;

/// Configuration for a capture session.
///
/// Both delays are measured independently from session start. Loadable from
/// TOML, where the delays are given in milliseconds:
///
/// ```toml
/// haptic_delay_ms = 2000
/// audio_delay_ms = 3000
/// haptic_pattern_ms = [300, 300, 300, 300, 300, 300]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Offset from session start at which the haptic cue fires (default: 2000ms).
    #[serde(rename = "haptic_delay_ms", with = "duration_ms")]
    pub haptic_delay: Duration,

    /// Offset from session start at which audio capture begins (default: 3000ms).
    #[serde(rename = "audio_delay_ms", with = "duration_ms")]
    pub audio_delay: Duration,

    /// Haptic pattern in milliseconds.
    #[serde(rename = "haptic_pattern_ms")]
    pub haptic_pattern: Vec<u64>,

    pub audio_mode: AudioModeOptions,

    pub audio_preset: AudioPreset,

    /// Export even if the audio stage never produced a recording. The archive
    /// then carries an empty `audio.m4a` entry (default: false).
    pub export_without_audio: bool,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.haptic_delay >= self.audio_delay {
            return Err(format!(
                "haptic delay ({}ms) must be earlier than audio delay ({}ms)",
                self.haptic_delay.as_millis(),
                self.audio_delay.as_millis()
            ));
        }
        if self.haptic_pattern.is_empty() {
            return Err("haptic pattern must not be empty".into());
        }
        Ok(())
    }

    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(contents: &str) -> Result<Self, SessionError> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| SessionError::ConfigurationFailed(format!("failed to parse config: {}", e)))?;
        config.validate().map_err(SessionError::ConfigurationFailed)?;
        Ok(config)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            haptic_delay: Duration::from_millis(2000),
            audio_delay: Duration::from_millis(3000),
            haptic_pattern: vec![300; 6],
            audio_mode: AudioModeOptions::default(),
            audio_preset: AudioPreset::HighQuality,
            export_without_audio: false,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
