use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DigilogicError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl GateKind {
    pub const ALL: [GateKind; 7] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
    ];

    /// Number of inputs the gate reads.
    pub fn arity(&self) -> usize {
        match self {
            GateKind::Not => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
        };
        f.write_str(name)
    }
}

impl FromStr for GateKind {
    type Err = DigilogicError;
    fn from_str(s: &str) -> Result<GateKind> {
        GateKind::ALL
            .iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| DigilogicError::parse(format!("Unknown gate '{}'", s.trim()), s))
    }
}

/// Output of a gate. NOT ignores `b`; a binary gate reads a missing `b` as low.
pub fn evaluate(kind: GateKind, a: bool, b: Option<bool>) -> bool {
    let b = b.unwrap_or(false);
    match kind {
        GateKind::And => a && b,
        GateKind::Or => a || b,
        GateKind::Not => !a,
        GateKind::Nand => !(a && b),
        GateKind::Nor => !(a || b),
        GateKind::Xor => a != b,
        GateKind::Xnor => a == b,
    }
}

/// One input combination and the output of every gate for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TruthRow {
    pub a: bool,
    pub b: bool,
    pub and: bool,
    pub or: bool,
    pub not: bool,
    pub nand: bool,
    pub nor: bool,
    pub xor: bool,
    pub xnor: bool,
}

impl TruthRow {
    pub fn output(&self, kind: GateKind) -> bool {
        match kind {
            GateKind::And => self.and,
            GateKind::Or => self.or,
            GateKind::Not => self.not,
            GateKind::Nand => self.nand,
            GateKind::Nor => self.nor,
            GateKind::Xor => self.xor,
            GateKind::Xnor => self.xnor,
        }
    }
}

/// The combined truth table, rows ordered `00, 01, 10, 11`.
pub fn truth_table() -> [TruthRow; 4] {
    [(false, false), (false, true), (true, false), (true, true)].map(|(a, b)| {
        let eval = |kind| evaluate(kind, a, Some(b));
        TruthRow {
            a,
            b,
            and: eval(GateKind::And),
            or: eval(GateKind::Or),
            not: eval(GateKind::Not),
            nand: eval(GateKind::Nand),
            nor: eval(GateKind::Nor),
            xor: eval(GateKind::Xor),
            xnor: eval(GateKind::Xnor),
        }
    })
}
