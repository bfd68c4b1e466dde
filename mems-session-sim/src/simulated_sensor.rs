//! Simulated motion sensor.
//!
//! Emits a three-axis sine wave at a fixed rate on a dedicated thread per
//! subscription, the way a platform sensor driver calls back from its own
//! thread.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use mems_session_core::{RawSample, SampleCallback, SensorSource, SessionError, SubscriptionHandle};

/// Slowest supported delivery rate.
pub const MIN_RATE_HZ: f64 = 0.1;
/// Fastest supported delivery rate.
pub const MAX_RATE_HZ: f64 = 10_000.0;

/// Check that `rate_hz` is a finite rate within the supported range.
pub fn validate_rate(rate_hz: f64) -> Result<(), String> {
    if rate_hz.is_finite() && (MIN_RATE_HZ..=MAX_RATE_HZ).contains(&rate_hz) {
        Ok(())
    } else {
        Err(format!(
            "sensor rate {} Hz outside {}..={} Hz",
            rate_hz, MIN_RATE_HZ, MAX_RATE_HZ
        ))
    }
}

struct Worker {
    handle: SubscriptionHandle,
    /// Dropping the sender wakes the thread and ends it.
    stop: Option<Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

pub struct SimulatedSensor {
    name: String,
    rate_hz: f64,
    amplitude: f64,
    available: bool,
    next_id: u64,
    workers: Mutex<Vec<Worker>>,
}

impl SimulatedSensor {
    pub fn new(name: impl Into<String>, rate_hz: f64, amplitude: f64) -> Self {
        Self {
            name: name.into(),
            rate_hz,
            amplitude,
            available: true,
            next_id: 0,
            workers: Mutex::new(Vec::new()),
        }
    }

    /// A sensor the device does not have.
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate_hz: 1.0,
            amplitude: 0.0,
            available: false,
            next_id: 0,
            workers: Mutex::new(Vec::new()),
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.workers.lock().len()
    }

    fn stop_worker(mut worker: Worker) {
        drop(worker.stop.take());
        if let Some(thread) = worker.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Reading `index` of a wave with period `rate_hz` samples; axes are phase-shifted.
fn reading(index: u64, rate_hz: f64, amplitude: f64) -> RawSample {
    let phase = index as f64 / rate_hz * std::f64::consts::TAU;
    RawSample::new(
        amplitude * phase.sin(),
        amplitude * (phase + std::f64::consts::FRAC_PI_2).sin(),
        amplitude * (phase + std::f64::consts::PI).sin(),
    )
}

fn stream(stop: Receiver<()>, period: Duration, rate_hz: f64, amplitude: f64, callback: SampleCallback) {
    let mut index = 0u64;
    loop {
        match stop.recv_timeout(period) {
            Err(RecvTimeoutError::Timeout) => {
                callback(reading(index, rate_hz, amplitude));
                index += 1;
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

impl SensorSource for SimulatedSensor {
    fn is_available(&self) -> bool {
        self.available
    }

    fn subscribe(&mut self, callback: SampleCallback) -> Result<SubscriptionHandle, SessionError> {
        if !self.available {
            return Err(SessionError::DeviceUnavailable(format!("{} not present", self.name)));
        }
        validate_rate(self.rate_hz)
            .map_err(|e| SessionError::DeviceOperationFailure(format!("{}: {}", self.name, e)))?;

        self.next_id += 1;
        let handle = SubscriptionHandle(self.next_id);
        let period = Duration::from_secs_f64(1.0 / self.rate_hz);
        let (rate_hz, amplitude) = (self.rate_hz, self.amplitude);
        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);

        let thread = thread::Builder::new()
            .name(format!("{}-sensor", self.name))
            .spawn(move || stream(stop_rx, period, rate_hz, amplitude, callback))
            .map_err(|e| SessionError::DeviceOperationFailure(format!("failed to spawn {} thread: {}", self.name, e)))?;

        self.workers.lock().push(Worker {
            handle,
            stop: Some(stop_tx),
            thread: Some(thread),
        });
        log::debug!("{} streaming at {} Hz", self.name, self.rate_hz);
        Ok(handle)
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> Result<(), SessionError> {
        let worker = {
            let mut workers = self.workers.lock();
            workers
                .iter()
                .position(|w| w.handle == handle)
                .map(|i| workers.remove(i))
        };
        if let Some(worker) = worker {
            Self::stop_worker(worker);
        }
        Ok(())
    }
}

impl Drop for SimulatedSensor {
    fn drop(&mut self) {
        for worker in self.workers.lock().drain(..) {
            Self::stop_worker(worker);
        }
    }
}
