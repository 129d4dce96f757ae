use std::fmt::Display;
use std::time::Duration;

use crate::round::RoundId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    PlayTarget,
    Advance,
}

/// A delayed follow-up requested by the engine, bound to the round it was scheduled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub round: RoundId,
    pub kind: TimerKind,
    pub delay: Duration,
}

impl ScheduledTimer {
    pub fn new(round: RoundId, kind: TimerKind, delay: Duration) -> Self {
        Self { round, kind, delay }
    }
}

impl Display for ScheduledTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}(round={}, delay={}ms)",
            self.kind,
            self.round,
            self.delay.as_millis()
        )
    }
}
