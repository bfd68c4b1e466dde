use std::path::PathBuf;
use std::sync::Arc;

use crate::export::bundler::{ExportBundler, ExportInput};
use crate::models::audio::AudioHandle;
use crate::models::config::SessionConfig;
use crate::models::error::SessionError;
use crate::models::export::ExportReport;
use crate::models::sample::ChannelId;
use crate::models::stage::{Stage, StageKey};
use crate::models::state::SessionState;
use crate::processing::ledger::TimestampLedger;
use crate::processing::schedule::StageSchedule;
use crate::processing::stream_buffer::SensorStreamBuffer;
use crate::traits::archive_transport::ArchiveTransport;
use crate::traits::audio_device::AudioCaptureDevice;
use crate::traits::clock::{Clock, SystemClock};
use crate::traits::durable_store::DurableStore;
use crate::traits::haptic_device::HapticDevice;
use crate::traits::sensor_source::SensorSource;
use crate::traits::session_delegate::SessionDelegate;

/// The devices a controller drives for the whole of its life.
pub struct SessionDevices<G, X, A, H> {
    pub gyroscope: G,
    pub accelerometer: X,
    pub audio: A,
    pub haptic: H,
}

/// State of the one live session. Created on start, consumed on stop.
struct Session {
    id: String,
    schedule: StageSchedule,
    gyroscope: SensorStreamBuffer,
    accelerometer: SensorStreamBuffer,
    ledger: TimestampLedger,
    audio: Option<AudioHandle>,
}

/// Capture session orchestrator.
///
/// Generic over the two motion sensors, the audio recorder and the haptic
/// motor. Runs on a single logical thread: the host calls `tick` from its
/// loop, and every buffer append, stage firing and device call happens inside
/// `start`, `tick` or `stop`.
///
/// ```text
/// [Gyroscope] → channel ─→ [gyro buffer]  ─┐
/// [Accelerometer] → channel → [accel buffer]┼→ stop → [ExportBundler] → store + transport
/// [StageSchedule] → haptic cue, audio start ┘
///                     ↓
///              [TimestampLedger]
/// ```
///
/// The haptic and audio stages fire at fixed offsets from the start instant,
/// independently of each other. Device failures are logged and reported to
/// the delegate. They never roll back state already applied.
pub struct SessionController<G, X, A, H>
where
    G: SensorSource,
    X: SensorSource,
    A: AudioCaptureDevice,
    H: HapticDevice,
{
    devices: SessionDevices<G, X, A, H>,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    bundler: ExportBundler,
    delegate: Option<Arc<dyn SessionDelegate>>,
    state: SessionState,
    session: Option<Session>,
}

impl<G, X, A, H> SessionController<G, X, A, H>
where
    G: SensorSource,
    X: SensorSource,
    A: AudioCaptureDevice,
    H: HapticDevice,
{
    pub fn new(
        devices: SessionDevices<G, X, A, H>,
        config: SessionConfig,
        store: Arc<dyn DurableStore>,
        transport: Arc<dyn ArchiveTransport>,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::ConfigurationFailed)?;

        if !devices.gyroscope.is_available() {
            log::warn!("Gyroscope not available");
        }
        if !devices.accelerometer.is_available() {
            log::warn!("Accelerometer not available");
        }

        Ok(Self {
            devices,
            config,
            clock: Arc::new(SystemClock),
            bundler: ExportBundler::new(store, transport),
            delegate: None,
            state: SessionState::Idle,
            session: None,
        })
    }

    /// Replace the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the `StartSession` trigger should be enabled.
    pub fn can_start(&self) -> bool {
        self.state.is_idle()
    }

    /// Whether the `StopAndShare` trigger should be enabled.
    pub fn can_stop(&self) -> bool {
        self.state.is_active()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }

    pub fn ledger(&self) -> Option<&TimestampLedger> {
        self.session.as_ref().map(|s| &s.ledger)
    }

    /// Buffered (gyroscope, accelerometer) sample counts as of the last tick.
    pub fn sample_counts(&self) -> Option<(usize, usize)> {
        self.session
            .as_ref()
            .map(|s| (s.gyroscope.len(), s.accelerometer.len()))
    }

    /// Whether the audio stage produced a running recording.
    pub fn is_recording_audio(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.audio.is_some())
    }

    /// Instant at which the next stage becomes due, if any remain.
    pub fn next_deadline(&self) -> Option<std::time::Instant> {
        self.session.as_ref().and_then(|s| s.schedule.next_deadline())
    }

    /// Start a session. Transitions: idle → active.
    ///
    /// Returns `false` without touching anything if a session is already
    /// running. Sensor or audio setup failures are logged and the session
    /// starts anyway.
    pub fn start(&mut self) -> bool {
        if !self.state.is_idle() {
            log::warn!("Start ignored: session is {}", self.state.name());
            return false;
        }

        self.prepare_audio_session();

        let anchor = self.clock.monotonic();
        let schedule = match StageSchedule::from_config(anchor, &self.config) {
            Ok(schedule) => schedule,
            Err(e) => {
                self.report(&e);
                return false;
            }
        };

        let mut session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            schedule,
            gyroscope: SensorStreamBuffer::new(ChannelId::Gyroscope),
            accelerometer: SensorStreamBuffer::new(ChannelId::Accelerometer),
            ledger: TimestampLedger::new(),
            audio: None,
        };

        let started_at = self.clock.wall();
        self.record(&mut session, StageKey::MemsStart, started_at);
        self.set_state(SessionState::Active);

        if let Err(e) = attach_channel(&mut self.devices.gyroscope, &mut session.gyroscope, &self.clock) {
            self.report(&e);
        }
        if let Err(e) = attach_channel(&mut self.devices.accelerometer, &mut session.accelerometer, &self.clock) {
            self.report(&e);
        }

        log::info!(
            "Session {} started: haptic at +{}ms, audio at +{}ms",
            session.id,
            self.config.haptic_delay.as_millis(),
            self.config.audio_delay.as_millis()
        );
        self.session = Some(session);
        true
    }

    /// One cooperative scheduler step.
    ///
    /// Appends every reading delivered since the previous tick, then fires
    /// each stage whose offset has elapsed, in offset order. Does nothing
    /// unless active.
    pub fn tick(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let Some(mut session) = self.session.take() else {
            return;
        };

        session.gyroscope.pump();
        session.accelerometer.pump();

        for stage in session.schedule.due(self.clock.monotonic()) {
            match stage {
                Stage::Haptic => self.fire_haptic(&mut session),
                Stage::AudioCapture => self.fire_audio(&mut session),
            }
        }

        self.session = Some(session);
    }

    /// Stop the session and export it.
    /// Transitions: active → stopping → idle.
    ///
    /// Returns `Ok(None)` without touching anything when not active. Without a
    /// finalized recording no export happens unless `export_without_audio`
    /// is set. The session is cleared and the controller returns to idle even
    /// when export fails; files written before the failure stay on disk.
    pub fn stop(&mut self) -> Result<Option<ExportReport>, SessionError> {
        if !self.state.is_active() {
            log::debug!("Stop ignored: session is {}", self.state.name());
            return Ok(None);
        }
        let Some(mut session) = self.session.take() else {
            self.set_state(SessionState::Idle);
            return Ok(None);
        };

        let (audio_path, audio_error) = match session.audio.take() {
            Some(handle) => match self.finalize_audio(&handle) {
                Ok(path) => (Some(path), None),
                Err(e) => {
                    log::error!("Failed to finalize audio for session {}: {}", session.id, e);
                    self.report(&e);
                    (None, Some(e))
                }
            },
            None => (None, None),
        };

        if let Err(e) = session.gyroscope.detach(&mut self.devices.gyroscope) {
            self.report(&e);
        }
        if let Err(e) = session.accelerometer.detach(&mut self.devices.accelerometer) {
            self.report(&e);
        }

        self.set_state(SessionState::Stopping);

        let result = if audio_path.is_none() && !self.config.export_without_audio {
            log::info!("Session {} has no audio recording; skipping export", session.id);
            match audio_error {
                Some(e) => Err(e),
                None => Ok(None),
            }
        } else {
            let input = ExportInput {
                session_id: &session.id,
                config: &self.config,
                gyroscope: &session.gyroscope,
                accelerometer: &session.accelerometer,
                ledger: &session.ledger,
                audio_path: audio_path.as_deref(),
                exported_at: self.clock.wall(),
            };
            match self.bundler.export(&input) {
                Ok(report) => {
                    if let Some(ref delegate) = self.delegate {
                        delegate.on_export_finished(&report);
                    }
                    Ok(Some(report))
                }
                Err(e) => {
                    self.report(&e);
                    Err(e)
                }
            }
        };

        drop(session);
        self.set_state(SessionState::Idle);
        result
    }

    // --- Internal helpers ---

    fn set_state(&mut self, new_state: SessionState) {
        self.state = new_state;
        log::debug!("Session state: {}", new_state.name());
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(new_state);
        }
    }

    fn report(&self, error: &SessionError) {
        log::warn!("Session error: {}", error);
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }

    fn record(&self, session: &mut Session, key: StageKey, at: chrono::DateTime<chrono::Utc>) {
        match session.ledger.record(key, at) {
            Ok(()) => {
                if let Some(ref delegate) = self.delegate {
                    delegate.on_stage_recorded(key, at);
                }
            }
            Err(e) => self.report(&e),
        }
    }

    /// Permission request and audio mode, ahead of the audio stage.
    fn prepare_audio_session(&mut self) {
        match self.devices.audio.request_permission() {
            Ok(true) => {}
            Ok(false) => self.report(&SessionError::PermissionDenied),
            Err(e) => self.report(&e),
        }
        if let Err(e) = self.devices.audio.configure_mode(&self.config.audio_mode) {
            log::error!("Failed to configure audio mode: {}", e);
            self.report(&e);
        }
    }

    fn fire_haptic(&mut self, session: &mut Session) {
        let at = self.clock.wall();
        self.record(session, StageKey::Vibration, at);
        if let Err(e) = self.devices.haptic.pulse(&self.config.haptic_pattern) {
            log::error!("Haptic cue failed: {}", e);
            self.report(&e);
        }
    }

    fn fire_audio(&mut self, session: &mut Session) {
        match self.start_audio(session) {
            Ok(handle) => {
                log::info!("Audio capture started for session {} ({})", session.id, handle.0);
                session.audio = Some(handle);
            }
            Err(e) => {
                log::error!("Audio capture failed to start, continuing without audio: {}", e);
                self.report(&e);
            }
        }
    }

    fn start_audio(&mut self, session: &mut Session) -> Result<AudioHandle, SessionError> {
        self.devices.audio.prepare(&self.config.audio_preset)?;
        let prepared_at = self.clock.wall();
        self.record(session, StageKey::AudioStart, prepared_at);

        let handle = self.devices.audio.start()?;
        let started_at = self.clock.wall();
        self.record(session, StageKey::AudioStartCommandEnd, started_at);
        Ok(handle)
    }

    fn finalize_audio(&mut self, handle: &AudioHandle) -> Result<PathBuf, SessionError> {
        let resource = self.devices.audio.stop_and_finalize(handle)?;
        self.devices.audio.resolve_path(&resource)
    }
}

impl<G, X, A, H> Drop for SessionController<G, X, A, H>
where
    G: SensorSource,
    X: SensorSource,
    A: AudioCaptureDevice,
    H: HapticDevice,
{
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            let _ = session.gyroscope.detach(&mut self.devices.gyroscope);
            let _ = session.accelerometer.detach(&mut self.devices.accelerometer);
        }
    }
}

/// Subscribe `buffer` to `source`, skipping sources that report unavailable.
fn attach_channel<S: SensorSource>(
    source: &mut S,
    buffer: &mut SensorStreamBuffer,
    clock: &Arc<dyn Clock>,
) -> Result<(), SessionError> {
    if !source.is_available() {
        return Err(SessionError::DeviceUnavailable(format!(
            "{} not available, channel stays empty",
            buffer.channel()
        )));
    }
    buffer.attach(source, Arc::clone(clock))
}
