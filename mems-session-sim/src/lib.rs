//! Simulated device backend for `mems-session-core`.
//!
//! Provides sensors that emit sine waves from their own threads, a
//! microphone that writes a tone WAV, a haptic motor that logs, and an outbox
//! transport. [`run`] wires them into a controller and drives one session
//! to completion.

pub mod config;
pub mod delegate;
pub mod error;
pub mod log_haptic;
pub mod outbox_transport;
pub mod simulated_microphone;
pub mod simulated_sensor;
pub mod wav;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use mems_session_core::{ExportReport, FsStore, SessionController, SessionDevices};

pub use config::HostConfig;
pub use delegate::LogDelegate;
pub use error::HostError;
pub use log_haptic::LogHaptic;
pub use outbox_transport::OutboxTransport;
pub use simulated_microphone::SimulatedMicrophone;
pub use simulated_sensor::SimulatedSensor;

const GYRO_AMPLITUDE: f64 = 0.5;
const ACCEL_AMPLITUDE: f64 = 9.81;

/// Run one session for `run_duration_ms`, ticking every `tick_interval_ms`,
/// then stop and export.
pub fn run(config: &HostConfig, delegate: Arc<LogDelegate>) -> Result<Option<ExportReport>, HostError> {
    config.validate()?;

    let gyroscope = if config.gyroscope_missing {
        SimulatedSensor::missing("gyroscope")
    } else {
        SimulatedSensor::new("gyroscope", config.gyroscope_rate_hz, GYRO_AMPLITUDE)
    };
    let devices = SessionDevices {
        gyroscope,
        accelerometer: SimulatedSensor::new("accelerometer", config.accelerometer_rate_hz, ACCEL_AMPLITUDE),
        audio: SimulatedMicrophone::new(config.document_dir.join("recordings")),
        haptic: LogHaptic::default(),
    };

    let mut controller = SessionController::new(
        devices,
        config.session.clone(),
        Arc::new(FsStore::new(&config.document_dir)),
        Arc::new(OutboxTransport::new(&config.outbox_dir)),
    )?;
    controller.set_delegate(delegate);

    if !controller.start() {
        return Err(HostError::NotStarted);
    }

    let deadline = Instant::now() + Duration::from_millis(config.run_duration_ms);
    let interval = Duration::from_millis(config.tick_interval_ms);
    while Instant::now() < deadline {
        controller.tick();
        thread::sleep(interval);
    }
    controller.tick();

    if let Some((gyro, accel)) = controller.sample_counts() {
        log::info!("Captured {} gyroscope and {} accelerometer samples", gyro, accel);
    }

    Ok(controller.stop()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mems_session_core::SessionConfig;

    fn short_run(dir: &std::path::Path) -> HostConfig {
        HostConfig {
            session: SessionConfig {
                haptic_delay: Duration::from_millis(50),
                audio_delay: Duration::from_millis(100),
                ..SessionConfig::default()
            },
            document_dir: dir.join("docs"),
            outbox_dir: dir.join("outbox"),
            run_duration_ms: 300,
            tick_interval_ms: 5,
            ..HostConfig::default()
        }
    }

    #[test]
    fn runs_a_session_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = short_run(dir.path());
        let delegate = Arc::new(LogDelegate::new());

        let report = run(&config, delegate.clone()).unwrap().unwrap();

        assert!(report.archive_path.exists());
        assert!(report.row_count > 0);
        assert_eq!(std::fs::read_dir(&config.outbox_dir).unwrap().count(), 1);

        let info = std::fs::read_to_string(&report.json_path).unwrap();
        assert!(info.contains("\"audioStartTime\""));
        assert!(info.contains("\"vibrationTime\""));
        assert!(delegate.errors().is_empty());
    }

    #[test]
    fn missing_gyroscope_still_exports() {
        let dir = tempfile::tempdir().unwrap();
        let config = HostConfig {
            gyroscope_missing: true,
            ..short_run(dir.path())
        };
        let delegate = Arc::new(LogDelegate::new());

        let report = run(&config, delegate.clone()).unwrap().unwrap();

        assert_eq!(report.row_count, 0);
        assert!(delegate.errors().iter().any(|e| e.contains("gyroscope")));
    }
}
