use std::fmt;

use rust_fsm::state_machine;

/*
 * Idle: the player has not pressed start yet
 * Unresolved: four candidates shown, waiting for a selection
 * Resolved: feedback window, waiting for the advance timer
 * Advance replaces the round, the game never ends on its own
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub RoundFsm(Idle)

    Idle => {
        Start => Unresolved
    },
    Unresolved => {
        Select => Resolved
    },
    Resolved => {
        Advance => Unresolved
    }
}

impl fmt::Display for RoundFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
