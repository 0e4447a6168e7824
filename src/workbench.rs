//! Session state shared by the command engine and the HTTP server.
//!
//! The only state that outlives a single call is the flip-flop being
//! simulated. It is held as an immutable [`FlipFlop`] record and swapped for a
//! new one on every pulse, select or reset.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::error::{DigilogicError, Result};
use crate::flipflop::{FlipFlop, FlipFlopInputs, FlipFlopKind};
use crate::settings::Settings;

#[derive(Debug)]
pub struct Workbench {
    settings: Settings,
    flip_flop: Mutex<FlipFlop>,
}

impl Workbench {
    pub fn new(settings: Settings) -> Self {
        let flip_flop = FlipFlop::new(settings.initial_flip_flop);
        Self { settings, flip_flop: Mutex::new(flip_flop) }
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    // a FlipFlop is Copy and replaced in one assignment, so a poisoned lock still holds a whole record
    fn guard(&self) -> MutexGuard<'_, FlipFlop> {
        self.flip_flop.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
    pub fn flip_flop(&self) -> FlipFlop {
        *self.guard()
    }
    /// Switches to another kind of flip-flop, starting from a reset state.
    pub fn select(&self, kind: FlipFlopKind) -> FlipFlop {
        let selected = FlipFlop::new(kind);
        *self.guard() = selected;
        debug!(%kind, "flip-flop selected");
        selected
    }
    /// Applies one clock pulse and returns the record before and after it.
    /// Inputs for another kind of flip-flop are refused.
    pub fn clock(&self, inputs: FlipFlopInputs) -> Result<(FlipFlop, FlipFlop)> {
        let mut guard = self.guard();
        let before = *guard;
        if inputs.kind() != before.kind {
            return Err(DigilogicError::Parse {
                message: format!("{} inputs given to a {} flip-flop", inputs.kind(), before.kind),
                command: None,
            });
        }
        let after = before.clock(inputs);
        *guard = after;
        debug!(%inputs, from = before.state, to = after.state, "clock pulse");
        Ok((before, after))
    }
    /// Like [`Workbench::clock`] with positional inputs interpreted for the current kind.
    pub fn clock_values(&self, values: &[bool]) -> Result<(FlipFlop, FlipFlop)> {
        let inputs = self.flip_flop().kind.inputs(values)?;
        self.clock(inputs)
    }
    pub fn reset(&self) -> FlipFlop {
        let mut guard = self.guard();
        *guard = guard.reset();
        *guard
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
