use std::sync::Arc;

use crate::models::error::SessionError;
use crate::models::sample::RawSample;

/// Callback invoked for every reading a sensor delivers.
///
/// May fire on a device thread. Keep processing minimal.
pub type SampleCallback = Arc<dyn Fn(RawSample) + Send + Sync + 'static>;

/// Opaque token identifying one subscription on a sensor source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

/// Interface for a motion-sensor channel (gyroscope, accelerometer).
///
/// Sources are independently clocked: no rate or ordering guarantee holds
/// between two sources.
pub trait SensorSource: Send + Sync {
    /// Whether this sensor is present on the device.
    fn is_available(&self) -> bool;

    /// Start delivering readings to `callback`.
    fn subscribe(&mut self, callback: SampleCallback) -> Result<SubscriptionHandle, SessionError>;

    /// Stop delivering readings for `handle`. Unknown handles are ignored.
    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> Result<(), SessionError>;
}
