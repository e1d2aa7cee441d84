//! Mock digital I/O pins.

use crate::{error::Result, traits::{InputPin, OutputPin}};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Mock output pin recording every level transition.
#[derive(Debug)]
pub struct MockOutputPin {
    level: Arc<AtomicBool>,
    transitions: Arc<Mutex<Vec<bool>>>,
}

impl MockOutputPin {
    /// Create a pin at `initial` level plus its observer handle.
    pub fn new(initial: bool) -> (Self, MockOutputPinHandle) {
        let level = Arc::new(AtomicBool::new(initial));
        let transitions = Arc::new(Mutex::new(Vec::new()));

        let pin = Self {
            level: Arc::clone(&level),
            transitions: Arc::clone(&transitions),
        };
        let handle = MockOutputPinHandle { level, transitions };

        (pin, handle)
    }
}

impl OutputPin for MockOutputPin {
    async fn set_level(&mut self, level: bool) -> Result<()> {
        self.level.store(level, Ordering::SeqCst);
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(level);
        Ok(())
    }
}

/// Observer handle for a [`MockOutputPin`].
#[derive(Debug, Clone)]
pub struct MockOutputPinHandle {
    level: Arc<AtomicBool>,
    transitions: Arc<Mutex<Vec<bool>>>,
}

impl MockOutputPinHandle {
    /// Current pin level.
    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }

    /// Every level written so far, oldest first.
    pub fn transitions(&self) -> Vec<bool> {
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Mock input pin whose level is set by the test through its handle.
#[derive(Debug)]
pub struct MockInputPin {
    level: Arc<AtomicBool>,
}

impl MockInputPin {
    /// Create a pin reading `initial` plus its control handle.
    pub fn new(initial: bool) -> (Self, MockInputPinHandle) {
        let level = Arc::new(AtomicBool::new(initial));
        let pin = Self {
            level: Arc::clone(&level),
        };
        let handle = MockInputPinHandle { level };
        (pin, handle)
    }
}

impl InputPin for MockInputPin {
    async fn read_level(&self) -> Result<bool> {
        Ok(self.level.load(Ordering::SeqCst))
    }
}

/// Control handle for a [`MockInputPin`].
#[derive(Debug, Clone)]
pub struct MockInputPinHandle {
    level: Arc<AtomicBool>,
}

impl MockInputPinHandle {
    /// Drive the simulated input to `level`.
    pub fn set_level(&self, level: bool) {
        self.level.store(level, Ordering::SeqCst);
    }
}
