//! Simulated microphone.
//!
//! Records nothing; on finalize it writes a sine tone lasting as long as the
//! recording ran, as a 16-bit mono WAV file in its output directory.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use mems_session_core::{AudioCaptureDevice, AudioHandle, AudioModeOptions, AudioPreset, AudioResource, SessionError};

use crate::wav;

const TONE_HZ: f64 = 440.0;

struct ActiveRecording {
    handle: AudioHandle,
    started: Instant,
}

pub struct SimulatedMicrophone {
    output_directory: PathBuf,
    permission_granted: bool,
    recording_allowed: bool,
    prepared_rate: Option<u32>,
    active: Option<(ActiveRecording, u32)>,
}

impl SimulatedMicrophone {
    pub fn new(output_directory: impl Into<PathBuf>) -> Self {
        Self {
            output_directory: output_directory.into(),
            permission_granted: true,
            recording_allowed: false,
            prepared_rate: None,
            active: None,
        }
    }

    /// Microphone whose permission prompt is always declined.
    pub fn denied(output_directory: impl Into<PathBuf>) -> Self {
        Self {
            permission_granted: false,
            ..Self::new(output_directory)
        }
    }

    fn sample_rate(preset: &AudioPreset) -> u32 {
        match preset {
            AudioPreset::HighQuality => 44_100,
            AudioPreset::LowQuality => 8_000,
        }
    }

    fn file_path(&self, id: &str) -> PathBuf {
        self.output_directory.join(format!("recording_{}.wav", id))
    }
}

impl AudioCaptureDevice for SimulatedMicrophone {
    fn request_permission(&mut self) -> Result<bool, SessionError> {
        Ok(self.permission_granted)
    }

    fn configure_mode(&mut self, options: &AudioModeOptions) -> Result<(), SessionError> {
        self.recording_allowed = options.allows_recording;
        Ok(())
    }

    fn prepare(&mut self, preset: &AudioPreset) -> Result<(), SessionError> {
        if !self.permission_granted {
            return Err(SessionError::PermissionDenied);
        }
        if !self.recording_allowed {
            return Err(SessionError::DeviceOperationFailure(
                "audio mode does not allow recording".into(),
            ));
        }
        if self.active.is_some() {
            return Err(SessionError::DeviceOperationFailure("recording already in progress".into()));
        }
        self.prepared_rate = Some(Self::sample_rate(preset));
        Ok(())
    }

    fn start(&mut self) -> Result<AudioHandle, SessionError> {
        let rate = self
            .prepared_rate
            .take()
            .ok_or_else(|| SessionError::DeviceOperationFailure("recorder not prepared".into()))?;
        let handle = AudioHandle(uuid::Uuid::new_v4().to_string());
        self.active = Some((
            ActiveRecording {
                handle: handle.clone(),
                started: Instant::now(),
            },
            rate,
        ));
        log::info!("Microphone recording {} at {} Hz", handle.0, rate);
        Ok(handle)
    }

    fn stop_and_finalize(&mut self, handle: &AudioHandle) -> Result<AudioResource, SessionError> {
        let (recording, rate) = match self.active.take() {
            Some((recording, rate)) if recording.handle == *handle => (recording, rate),
            other => {
                self.active = other;
                return Err(SessionError::DeviceOperationFailure(format!(
                    "no active recording {}",
                    handle.0
                )));
            }
        };

        let frames = (recording.started.elapsed().as_secs_f64() * rate as f64) as usize;
        let file = wav::encode_mono16(rate, &wav::tone_pcm(rate, TONE_HZ, frames));

        fs::create_dir_all(&self.output_directory)
            .map_err(|e| SessionError::DeviceOperationFailure(format!("failed to create directory: {}", e)))?;
        let path = self.file_path(&handle.0);
        fs::write(&path, &file)
            .map_err(|e| SessionError::DeviceOperationFailure(format!("failed to finalize recording: {}", e)))?;

        log::info!("Microphone finalized {} ({} bytes)", path.display(), file.len());
        Ok(AudioResource { id: handle.0.clone() })
    }

    fn resolve_path(&self, resource: &AudioResource) -> Result<PathBuf, SessionError> {
        let path = self.file_path(&resource.id);
        if path.exists() {
            Ok(path)
        } else {
            Err(SessionError::DeviceOperationFailure(format!(
                "recording {} not found",
                resource.id
            )))
        }
    }
}
