use std::path::PathBuf;

use crate::models::audio::{AudioHandle, AudioModeOptions, AudioPreset, AudioResource};
use crate::models::error::SessionError;

/// Interface for the platform audio recorder.
///
/// Calls are blocking and carry no timeout. A hung device stalls the caller.
pub trait AudioCaptureDevice: Send {
    /// Ask the OS for microphone access. `Ok(false)` means the user declined.
    fn request_permission(&mut self) -> Result<bool, SessionError>;

    /// Apply the audio session mode.
    fn configure_mode(&mut self, options: &AudioModeOptions) -> Result<(), SessionError>;

    /// Prepare a new recording with the given preset.
    fn prepare(&mut self, preset: &AudioPreset) -> Result<(), SessionError>;

    /// Start the prepared recording.
    fn start(&mut self) -> Result<AudioHandle, SessionError>;

    /// Stop the recording and finalize its file.
    fn stop_and_finalize(&mut self, handle: &AudioHandle) -> Result<AudioResource, SessionError>;

    /// Location of a finalized recording.
    fn resolve_path(&self, resource: &AudioResource) -> Result<PathBuf, SessionError>;
}
