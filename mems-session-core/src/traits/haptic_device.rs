use crate::models::error::SessionError;

/// Interface for the vibration motor.
pub trait HapticDevice: Send {
    /// Play a vibration pattern given as millisecond durations.
    fn pulse(&mut self, pattern_ms: &[u64]) -> Result<(), SessionError>;
}
