//! The lock controller loop.
//!
//! Consumes [`TagEvent`]s from the bounded channel and runs one actuation
//! cycle per event: drive the relay to release, hold until the manual
//! override (STOP) is pressed, wait out the re-lock delay, secure the relay
//! again. The cycle never interleaves with the next event — while a cycle is
//! in flight, further events simply queue in the channel.
//!
//! Polarity conventions (from the installed wiring):
//! - Relay is active-low: driving the pin low releases the hold, high
//!   secures it.
//! - Override is active-low: a pull-up input that reads low while the STOP
//!   switch is pressed.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use taglock_core::constants::{
    EVENT_CHANNEL_CAPACITY, OVERRIDE_POLL_INTERVAL_MS, RELOCK_DELAY_MS,
};
use taglock_core::{Error, Result, TagEvent};
use taglock_hardware::{HardwareError, InputPin, OutputPin};

use crate::state::{LockState, LockStateMachine};

/// Create the bounded tag-event channel joining reader loop and controller.
///
/// Capacity is fixed at [`EVENT_CHANNEL_CAPACITY`]; a full channel suspends
/// the producer until the controller drains an event. Nothing is dropped and
/// delivery order is the detection order.
pub fn event_channel() -> (mpsc::Sender<TagEvent>, mpsc::Receiver<TagEvent>) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}

/// Drives the relay from tag events, observing the override input.
pub struct LockController<R, I> {
    relay: R,
    override_input: I,
    events: mpsc::Receiver<TagEvent>,
    machine: LockStateMachine,
    relock_delay: Duration,
    poll_interval: Duration,
}

impl<R: OutputPin, I: InputPin> LockController<R, I> {
    /// Create a controller with the stock timing (100 ms override poll,
    /// 4 s re-lock delay).
    pub fn new(relay: R, override_input: I, events: mpsc::Receiver<TagEvent>) -> Self {
        Self {
            relay,
            override_input,
            events,
            machine: LockStateMachine::new(),
            relock_delay: Duration::from_millis(RELOCK_DELAY_MS),
            poll_interval: Duration::from_millis(OVERRIDE_POLL_INTERVAL_MS),
        }
    }

    /// Override the re-lock delay.
    #[must_use]
    pub fn with_relock_delay(mut self, delay: Duration) -> Self {
        self.relock_delay = delay;
        self
    }

    /// Override the override-input poll period.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Current cycle phase.
    pub fn state(&self) -> &LockState {
        self.machine.current_state()
    }

    /// Run until the event channel closes.
    ///
    /// Blocking on an empty channel is the steady state — the absence of
    /// tags is normal and there is deliberately no receive timeout.
    pub async fn run(mut self) -> Result<()> {
        // Start from a known-secured relay regardless of boot state.
        self.relay.set_level(true).await.map_err(hardware)?;
        info!("lock controller ready");

        while let Some(event) = self.events.recv().await {
            self.actuate(event).await?;
        }

        info!("event channel closed, lock controller stopping");
        Ok(())
    }

    /// One full actuation cycle for a single event.
    async fn actuate(&mut self, event: TagEvent) -> Result<()> {
        info!(epc = %event.epc_hex(), antenna = event.freq_ant, "tag accepted, releasing door");

        self.machine.transition_to(LockState::Engaged)?;
        self.relay.set_level(false).await.map_err(hardware)?;

        self.machine.transition_to(LockState::WaitingForOverride)?;
        self.wait_for_override().await?;

        self.machine.transition_to(LockState::Relocking)?;
        debug!(delay_ms = self.relock_delay.as_millis() as u64, "override pressed, re-locking");
        time::sleep(self.relock_delay).await;
        self.relay.set_level(true).await.map_err(hardware)?;

        self.machine.transition_to(LockState::Idle)?;
        info!("door secured");
        Ok(())
    }

    /// Poll the override input until it reads pressed (low).
    ///
    /// The wait has no upper bound — "no re-lock without override" is the
    /// safety contract — but the poll runs on a timer so the future stays
    /// cancellable.
    async fn wait_for_override(&mut self) -> Result<()> {
        let mut ticks = time::interval(self.poll_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticks.tick().await;
            if !self.override_input.read_level().await.map_err(hardware)? {
                return Ok(());
            }
            debug!("press STOP to allow re-lock");
        }
    }
}

fn hardware(error: HardwareError) -> Error {
    Error::Hardware(error.to_string())
}
