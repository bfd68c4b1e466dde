//! # mems-session-core
//!
//! Platform-agnostic capture session engine.
//!
//! Streams two motion-sensor channels, fires a haptic cue and starts audio
//! capture at fixed offsets from session start, and on stop bundles the
//! samples, the audio and the stage timestamps into one archive. Platform
//! backends implement the device traits and plug into the generic
//! `SessionController`.
//!
//! ## Architecture
//!
//! ```text
//! mems-session-core (this crate)
//! ├── traits/       ← SensorSource, AudioCaptureDevice, HapticDevice, DurableStore, ArchiveTransport, Clock, SessionDelegate
//! ├── models/       ← SessionError, SessionState, SessionConfig, Sample, StageKey, ExportReport
//! ├── processing/   ← SensorStreamBuffer, TimestampLedger, StageSchedule
//! ├── export/       ← mems.csv, info.json, session.zip, ExportBundler
//! ├── session/      ← SessionController (state machine)
//! └── storage/      ← FsStore
//! ```
//!
//! ## Synchronization
//!
//! The two channels are independently clocked and are paired by position
//! when exported. Row `i` of `mems.csv` is not guaranteed to hold readings
//! taken at the same instant.

pub mod export;
pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience.
pub use export::bundler::{ExportBundler, ExportInput};
pub use models::audio::{AudioHandle, AudioModeOptions, AudioPreset, AudioResource};
pub use models::config::SessionConfig;
pub use models::error::SessionError;
pub use models::export::{ExportBundle, ExportReport};
pub use models::sample::{ChannelId, RawSample, Sample};
pub use models::stage::{Stage, StageKey};
pub use models::state::SessionState;
pub use processing::ledger::TimestampLedger;
pub use processing::schedule::StageSchedule;
pub use processing::stream_buffer::SensorStreamBuffer;
pub use session::controller::{SessionController, SessionDevices};
pub use storage::fs_store::FsStore;
pub use traits::archive_transport::ArchiveTransport;
pub use traits::audio_device::AudioCaptureDevice;
pub use traits::clock::{Clock, SystemClock};
pub use traits::durable_store::DurableStore;
pub use traits::haptic_device::HapticDevice;
pub use traits::sensor_source::{SampleCallback, SensorSource, SubscriptionHandle};
pub use traits::session_delegate::SessionDelegate;
