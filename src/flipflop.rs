//! Next-state behaviour of the three classic clocked flip-flops.
//!
//! A [`FlipFlop`] is a value: clocking or resetting it returns a new record and
//! leaves the old one untouched. The clock is whatever the caller decides it is,
//! a call to [`FlipFlop::clock`] is one rising edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DigilogicError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlipFlopKind {
    Jk,
    D,
    T,
}

impl FlipFlopKind {
    pub const ALL: [FlipFlopKind; 3] = [FlipFlopKind::Jk, FlipFlopKind::D, FlipFlopKind::T];

    pub fn arity(&self) -> usize {
        match self {
            FlipFlopKind::Jk => 2,
            FlipFlopKind::D | FlipFlopKind::T => 1,
        }
    }

    /// Builds the input record for this kind from positional values.
    pub fn inputs(&self, values: &[bool]) -> Result<FlipFlopInputs> {
        match (self, values) {
            (FlipFlopKind::Jk, [j, k]) => Ok(FlipFlopInputs::Jk { j: *j, k: *k }),
            (FlipFlopKind::D, [d]) => Ok(FlipFlopInputs::D { d: *d }),
            (FlipFlopKind::T, [t]) => Ok(FlipFlopInputs::T { t: *t }),
            _ => Err(DigilogicError::Parse {
                message: format!("{} flip-flop takes {} input(s), got {}", self, self.arity(), values.len()),
                command: None,
            }),
        }
    }
}

impl fmt::Display for FlipFlopKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlipFlopKind::Jk => write!(f, "JK"),
            FlipFlopKind::D => write!(f, "D"),
            FlipFlopKind::T => write!(f, "T"),
        }
    }
}

impl FromStr for FlipFlopKind {
    type Err = DigilogicError;
    fn from_str(s: &str) -> Result<FlipFlopKind> {
        FlipFlopKind::ALL
            .iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| DigilogicError::parse(format!("Unknown flip-flop '{}'", s.trim()), s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum FlipFlopInputs {
    Jk { j: bool, k: bool },
    D { d: bool },
    T { t: bool },
}

impl FlipFlopInputs {
    pub fn kind(&self) -> FlipFlopKind {
        match self {
            FlipFlopInputs::Jk { .. } => FlipFlopKind::Jk,
            FlipFlopInputs::D { .. } => FlipFlopKind::D,
            FlipFlopInputs::T { .. } => FlipFlopKind::T,
        }
    }
}

impl fmt::Display for FlipFlopInputs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bit = |b: bool| if b { 1 } else { 0 };
        match self {
            FlipFlopInputs::Jk { j, k } => write!(f, "J={} K={}", bit(*j), bit(*k)),
            FlipFlopInputs::D { d } => write!(f, "D={}", bit(*d)),
            FlipFlopInputs::T { t } => write!(f, "T={}", bit(*t)),
        }
    }
}

/// Inputs meant for another kind of flip-flop leave the state as it is.
pub fn next_state(kind: FlipFlopKind, current: bool, inputs: FlipFlopInputs) -> bool {
    match (kind, inputs) {
        (FlipFlopKind::Jk, FlipFlopInputs::Jk { j, k }) => match (j, k) {
            (false, false) => current,
            (false, true) => false,
            (true, false) => true,
            (true, true) => !current,
        },
        (FlipFlopKind::D, FlipFlopInputs::D { d }) => d,
        (FlipFlopKind::T, FlipFlopInputs::T { t }) => current ^ t,
        _ => current,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipFlop {
    pub kind: FlipFlopKind,
    pub state: bool,
}

impl FlipFlop {
    pub fn new(kind: FlipFlopKind) -> FlipFlop {
        FlipFlop { kind, state: false }
    }
    /// The flip-flop after one clock pulse with `inputs` applied.
    #[must_use]
    pub fn clock(&self, inputs: FlipFlopInputs) -> FlipFlop {
        FlipFlop { kind: self.kind, state: next_state(self.kind, self.state, inputs) }
    }
    #[must_use]
    pub fn reset(&self) -> FlipFlop {
        FlipFlop::new(self.kind)
    }
    /// Complementary output Q'.
    pub fn q_bar(&self) -> bool {
        !self.state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRow {
    pub inputs: FlipFlopInputs,
    pub current: bool,
    pub next: bool,
}

/// Every input combination against both current states, inputs varying slowest.
pub fn characteristic_table(kind: FlipFlopKind) -> Vec<TransitionRow> {
    let combinations: Vec<FlipFlopInputs> = match kind {
        FlipFlopKind::Jk => [(false, false), (false, true), (true, false), (true, true)]
            .iter()
            .map(|&(j, k)| FlipFlopInputs::Jk { j, k })
            .collect(),
        FlipFlopKind::D => vec![FlipFlopInputs::D { d: false }, FlipFlopInputs::D { d: true }],
        FlipFlopKind::T => vec![FlipFlopInputs::T { t: false }, FlipFlopInputs::T { t: true }],
    };
    combinations
        .into_iter()
        .flat_map(|inputs| {
            [false, true].map(|current| TransitionRow { inputs, current, next: next_state(kind, current, inputs) })
        })
        .collect()
}
