//! Lock controller: the consumer half of the taglock pipeline.
//!
//! A [`LockController`] owns the relay and override pins and a receiver for
//! the bounded tag-event channel. It processes events one at a time, running
//! the Idle → Engaged → WaitingForOverride → Relocking cycle to completion
//! before looking at the next event; ordering and backpressure come from the
//! channel itself (see [`event_channel`]).

pub mod controller;
pub mod state;

pub use controller::{LockController, event_channel};
pub use state::{LockState, LockStateMachine, StateTransition};
