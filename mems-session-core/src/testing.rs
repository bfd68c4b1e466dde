//! Test doubles for the device, storage and clock traits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use crate::models::audio::{AudioHandle, AudioModeOptions, AudioPreset, AudioResource};
use crate::models::error::SessionError;
use crate::models::export::ExportReport;
use crate::models::sample::RawSample;
use crate::models::stage::StageKey;
use crate::models::state::SessionState;
use crate::traits::archive_transport::ArchiveTransport;
use crate::traits::audio_device::AudioCaptureDevice;
use crate::traits::clock::Clock;
use crate::traits::durable_store::DurableStore;
use crate::traits::haptic_device::HapticDevice;
use crate::traits::sensor_source::{SampleCallback, SensorSource, SubscriptionHandle};
use crate::traits::session_delegate::SessionDelegate;

/// Clock that only moves when told to. Starts at 2024-05-01T09:30:00Z.
pub struct ManualClock {
    base_instant: Instant,
    base_wall: DateTime<Utc>,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self {
            base_instant: Instant::now(),
            base_wall: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }

    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Clock for ManualClock {
    fn monotonic(&self) -> Instant {
        self.base_instant + *self.offset.lock()
    }

    fn wall(&self) -> DateTime<Utc> {
        self.base_wall + chrono::Duration::from_std(*self.offset.lock()).unwrap()
    }
}

#[derive(Default)]
struct SensorInner {
    available: bool,
    fail_subscribe: bool,
    next_id: u64,
    subscribers: Vec<(SubscriptionHandle, SampleCallback)>,
    unsubscribe_calls: usize,
}

/// Sensor whose readings are pushed by the test. Clones share state.
#[derive(Clone)]
pub struct MockSensor {
    inner: Arc<Mutex<SensorInner>>,
}

impl MockSensor {
    fn with(available: bool, fail_subscribe: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SensorInner {
                available,
                fail_subscribe,
                ..Default::default()
            })),
        }
    }

    pub fn available() -> Self {
        Self::with(true, false)
    }

    pub fn unavailable() -> Self {
        Self::with(false, false)
    }

    pub fn failing_subscribe() -> Self {
        Self::with(true, true)
    }

    pub fn emit(&self, sample: RawSample) {
        let callbacks: Vec<SampleCallback> = self
            .inner
            .lock()
            .subscribers
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(sample);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.inner.lock().unsubscribe_calls
    }
}

impl SensorSource for MockSensor {
    fn is_available(&self) -> bool {
        self.inner.lock().available
    }

    fn subscribe(&mut self, callback: SampleCallback) -> Result<SubscriptionHandle, SessionError> {
        let mut inner = self.inner.lock();
        if inner.fail_subscribe {
            return Err(SessionError::DeviceUnavailable("mock sensor".into()));
        }
        inner.next_id += 1;
        let handle = SubscriptionHandle(inner.next_id);
        inner.subscribers.push((handle, callback));
        Ok(handle)
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.unsubscribe_calls += 1;
        inner.subscribers.retain(|(h, _)| *h != handle);
        Ok(())
    }
}

#[derive(Default)]
struct AudioInner {
    deny_permission: bool,
    fail_prepare: bool,
    fail_start: bool,
    fail_finalize: bool,
    start_latency: Duration,
    calls: Vec<&'static str>,
}

/// Audio recorder that logs calls and can be told to fail. Clones share state.
#[derive(Clone)]
pub struct MockAudio {
    inner: Arc<Mutex<AudioInner>>,
    clock: Option<Arc<ManualClock>>,
}

impl MockAudio {
    pub const RECORDING_ID: &'static str = "rec-1";

    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AudioInner::default())),
            clock: None,
        }
    }

    /// Advance `clock` by `latency` inside every `start` call.
    pub fn with_start_latency(mut self, clock: Arc<ManualClock>, latency: Duration) -> Self {
        self.inner.lock().start_latency = latency;
        self.clock = Some(clock);
        self
    }

    pub fn deny_permission(&self) {
        self.inner.lock().deny_permission = true;
    }

    pub fn fail_prepare(&self) {
        self.inner.lock().fail_prepare = true;
    }

    pub fn fail_start(&self) {
        self.inner.lock().fail_start = true;
    }

    pub fn fail_finalize(&self) {
        self.inner.lock().fail_finalize = true;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().calls.clone()
    }

    pub fn recording_path() -> PathBuf {
        PathBuf::from(format!("/rec/{}.m4a", Self::RECORDING_ID))
    }
}

impl AudioCaptureDevice for MockAudio {
    fn request_permission(&mut self) -> Result<bool, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push("request_permission");
        Ok(!inner.deny_permission)
    }

    fn configure_mode(&mut self, _options: &AudioModeOptions) -> Result<(), SessionError> {
        self.inner.lock().calls.push("configure_mode");
        Ok(())
    }

    fn prepare(&mut self, _preset: &AudioPreset) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push("prepare");
        if inner.fail_prepare {
            return Err(SessionError::DeviceOperationFailure("prepare failed".into()));
        }
        Ok(())
    }

    fn start(&mut self) -> Result<AudioHandle, SessionError> {
        let latency = {
            let mut inner = self.inner.lock();
            inner.calls.push("start");
            if inner.fail_start {
                return Err(SessionError::DeviceOperationFailure("start failed".into()));
            }
            inner.start_latency
        };
        if let Some(clock) = &self.clock {
            clock.advance(latency);
        }
        Ok(AudioHandle(Self::RECORDING_ID.into()))
    }

    fn stop_and_finalize(&mut self, handle: &AudioHandle) -> Result<AudioResource, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push("stop_and_finalize");
        if inner.fail_finalize {
            return Err(SessionError::DeviceOperationFailure("finalize failed".into()));
        }
        Ok(AudioResource { id: handle.0.clone() })
    }

    fn resolve_path(&self, resource: &AudioResource) -> Result<PathBuf, SessionError> {
        Ok(PathBuf::from(format!("/rec/{}.m4a", resource.id)))
    }
}

/// Haptic motor that records every pattern it was asked to play.
#[derive(Clone, Default)]
pub struct MockHaptic {
    pulses: Arc<Mutex<Vec<Vec<u64>>>>,
    failing: Arc<AtomicBool>,
}

impl MockHaptic {
    pub fn pulses(&self) -> Vec<Vec<u64>> {
        self.pulses.lock().clone()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

impl HapticDevice for MockHaptic {
    fn pulse(&mut self, pattern_ms: &[u64]) -> Result<(), SessionError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SessionError::DeviceOperationFailure("motor stalled".into()));
        }
        self.pulses.lock().push(pattern_ms.to_vec());
        Ok(())
    }
}

/// In-memory store rooted at a fake document directory.
pub struct MemoryStore {
    root: PathBuf,
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    writes: Mutex<Vec<String>>,
    fail_name: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            fail_name: Mutex::new(None),
        }
    }

    /// Seed a file without counting it as a write.
    pub fn insert(&self, path: &Path, content: Vec<u8>) {
        self.files.lock().insert(path.to_path_buf(), content);
    }

    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().get(path).cloned()
    }

    /// File names written through the store, in order.
    pub fn written_names(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    pub fn fail_writes_to(&self, name: &str) {
        *self.fail_name.lock() = Some(name.to_string());
    }

    fn store(&self, path: &Path, content: Vec<u8>) -> Result<(), SessionError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.fail_name.lock().as_deref() == Some(name.as_str()) {
            return Err(SessionError::StorageWriteFailure(format!("disk full writing {}", name)));
        }
        self.files.lock().insert(path.to_path_buf(), content);
        self.writes.lock().push(name);
        Ok(())
    }
}

impl DurableStore for MemoryStore {
    fn location(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<(), SessionError> {
        self.store(path, content.as_bytes().to_vec())
    }

    fn write_binary(&self, path: &Path, content: &[u8]) -> Result<(), SessionError> {
        self.store(path, content.to_vec())
    }

    fn read_binary(&self, path: &Path) -> Result<Vec<u8>, SessionError> {
        self.get(path)
            .ok_or_else(|| SessionError::StorageWriteFailure(format!("no such file: {}", path.display())))
    }
}

/// Transport that records shared paths.
#[derive(Default)]
pub struct RecordingTransport {
    shared: Mutex<Vec<PathBuf>>,
    failing: AtomicBool,
}

impl RecordingTransport {
    pub fn shared(&self) -> Vec<PathBuf> {
        self.shared.lock().clone()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

impl ArchiveTransport for RecordingTransport {
    fn share(&self, path: &Path) -> Result<(), SessionError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SessionError::TransportFailure("share sheet dismissed".into()));
        }
        self.shared.lock().push(path.to_path_buf());
        Ok(())
    }
}

/// Delegate that records every notification.
#[derive(Default)]
pub struct RecordingDelegate {
    pub states: Mutex<Vec<SessionState>>,
    pub stages: Mutex<Vec<StageKey>>,
    pub errors: Mutex<Vec<SessionError>>,
    pub exports: Mutex<Vec<ExportReport>>,
}

impl SessionDelegate for RecordingDelegate {
    fn on_state_changed(&self, state: SessionState) {
        self.states.lock().push(state);
    }

    fn on_stage_recorded(&self, key: StageKey, _at: DateTime<Utc>) {
        self.stages.lock().push(key);
    }

    fn on_error(&self, error: &SessionError) {
        self.errors.lock().push(error.clone());
    }

    fn on_export_finished(&self, report: &ExportReport) {
        self.exports.lock().push(report.clone());
    }
}
