use serde::{Deserialize, Serialize};

/// Audio session mode applied before a capture session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioModeOptions {
    pub allows_recording: bool,
    pub plays_in_silent_mode: bool,
}

impl Default for AudioModeOptions {
    fn default() -> Self {
        Self {
            allows_recording: true,
            plays_in_silent_mode: true,
        }
    }
}

/// Recording preset passed to the device when preparing capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioPreset {
    #[default]
    HighQuality,
    LowQuality,
}

/// Handle to an in-progress recording, issued by `AudioCaptureDevice::start`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioHandle(pub String);

/// A finalized recording. Resolve it to a path through the audio device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioResource {
    pub id: String,
}
