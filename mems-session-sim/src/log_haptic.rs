use mems_session_core::{HapticDevice, SessionError};

/// Haptic motor stand-in that logs each pattern.
#[derive(Debug, Default)]
pub struct LogHaptic {
    pulses: usize,
}

impl LogHaptic {
    pub fn pulses(&self) -> usize {
        self.pulses
    }
}

impl HapticDevice for LogHaptic {
    fn pulse(&mut self, pattern_ms: &[u64]) -> Result<(), SessionError> {
        if pattern_ms.is_empty() {
            return Err(SessionError::DeviceOperationFailure("empty vibration pattern".into()));
        }
        self.pulses += 1;
        log::info!(
            "Vibrating {:?} ({}ms total)",
            pattern_ms,
            pattern_ms.iter().sum::<u64>()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_pulses() {
        let mut haptic = LogHaptic::default();
        haptic.pulse(&[300, 300]).unwrap();
        haptic.pulse(&[100]).unwrap();
        assert_eq!(haptic.pulses(), 2);
    }

    #[test]
    fn rejects_empty_pattern() {
        let mut haptic = LogHaptic::default();
        assert!(haptic.pulse(&[]).is_err());
        assert_eq!(haptic.pulses(), 0);
    }
}
