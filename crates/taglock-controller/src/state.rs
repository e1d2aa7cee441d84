//! Lock actuation state machine.
//!
//! The state machine tracks where the controller is in one actuation cycle
//! and rejects transitions that would skip a phase. States are named after
//! the actuator condition, not the door: `Engaged` means the relay has been
//! driven to release the electromagnetic hold.
//!
//! # Valid transitions
//!
//! - Idle → Engaged (tag event accepted)
//! - Engaged → WaitingForOverride (relay driven, waiting on the STOP switch)
//! - WaitingForOverride → Relocking (override observed)
//! - Relocking → Idle (re-lock delay elapsed, relay restored)
//!
//! There is no cancellation path: once a cycle starts it runs to Idle.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use taglock_core::{Error, Result};

/// Maximum number of transitions kept for diagnosis.
///
/// A full cycle is four transitions, so this covers the last ~16 actuations
/// at a few hundred bytes of memory.
const MAX_HISTORY_SIZE: usize = 64;

/// Phases of one lock actuation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Waiting on the event channel; the relay holds the door secured.
    Idle,

    /// A tag event was accepted and the relay has been driven to release.
    Engaged,

    /// Holding release until the manual override (STOP) reads pressed.
    WaitingForOverride,

    /// Override observed; counting down the fixed delay before securing.
    Relocking,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            LockState::Idle => "Idle",
            LockState::Engaged => "Engaged",
            LockState::WaitingForOverride => "WaitingForOverride",
            LockState::Relocking => "Relocking",
        };
        write!(f, "{}", state_str)
    }
}

impl LockState {
    /// Check if transition to `target` is valid from this state.
    pub fn can_transition_to(&self, target: &LockState) -> bool {
        matches!(
            (self, target),
            (LockState::Idle, LockState::Engaged)
                | (LockState::Engaged, LockState::WaitingForOverride)
                | (LockState::WaitingForOverride, LockState::Relocking)
                | (LockState::Relocking, LockState::Idle)
        )
    }
}

/// One recorded transition with its timestamp.
#[derive(Debug, Clone)]
pub struct StateTransition {
    pub from: LockState,
    pub to: LockState,
    pub timestamp: Instant,
}

impl StateTransition {
    fn new(from: LockState, to: LockState) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }

    /// Time since this transition occurred.
    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

/// Validated state tracker for the lock controller.
///
/// Not thread-safe by design: exactly one controller owns it and mutates it
/// from a single task.
#[derive(Debug)]
pub struct LockStateMachine {
    current_state: LockState,
    state_entered_at: Instant,
    history: VecDeque<StateTransition>,
}

impl LockStateMachine {
    /// Create a machine in the `Idle` state.
    pub fn new() -> Self {
        Self {
            current_state: LockState::Idle,
            state_entered_at: Instant::now(),
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Current state.
    pub fn current_state(&self) -> &LockState {
        &self.current_state
    }

    /// Time spent in the current state so far.
    pub fn time_in_current_state(&self) -> Duration {
        self.state_entered_at.elapsed()
    }

    /// Recent transitions, oldest first.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// Transition to `new_state`, validating the move.
    ///
    /// # Errors
    /// Returns `Error::InvalidStateTransition` when the cycle order would be
    /// violated; the current state is left untouched.
    pub fn transition_to(&mut self, new_state: LockState) -> Result<StateTransition> {
        if !self.current_state.can_transition_to(&new_state) {
            return Err(Error::InvalidStateTransition {
                from: self.current_state.to_string(),
                to: new_state.to_string(),
            });
        }

        let transition = StateTransition::new(self.current_state, new_state);

        self.current_state = new_state;
        self.state_entered_at = Instant::now();
        self.history.push_back(transition.clone());
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }

        Ok(transition)
    }
}

impl Default for LockStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
