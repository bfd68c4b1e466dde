/// Session controller state machine.
///
/// State transitions:
/// ```text
/// idle → active → stopping → idle
/// ```
///
/// The haptic and audio stages happen inside `Active`; they are tracked by
/// the session's stage schedule, not by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Stopping,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Name used in log lines and delegate payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Stopping => "stopping",
        }
    }
}
