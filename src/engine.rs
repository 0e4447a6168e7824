//! A small command language over the digital-logic operations.
//!
//! Scripts are semicolon separated commands, keywords are case-insensitive:
//!
//! ```text
//! convert 2A from hex;
//! gray 1010; ungray 1111; bcd 1010; excess3 1010;
//! complement 1010;
//! simplify (A + B)';
//! gate xor 1 0; truth table;
//! flipflop jk; clock 1 1; reset; state; characteristic t;
//! ```
//!
//! Every command yields a table of strings. [`Engine::execute_collect`]
//! returns the table of the last command, [`Engine::execute`] prints each one.

use std::str::FromStr;
use std::time::Instant;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::codes::{from_gray, group_nibbles, CodeKind};
use crate::complement::complement_text;
use crate::error::{DigilogicError, Result};
use crate::flipflop::{characteristic_table, FlipFlop, FlipFlopKind};
use crate::gate::{evaluate, truth_table, GateKind};
use crate::radix::{convert, Radix};
use crate::simplify::simplify_traced;
use crate::workbench::Workbench;
use crate::{bits::BitString, codes};

lazy_static! {
    static ref CONVERT: Regex = Regex::new(r"(?i)^convert\s+(\S+)\s+from\s+(\S+)$").unwrap();
    static ref CODE: Regex = Regex::new(r"(?i)^(gray|ungray|bcd|excess3)(?:\s+(\S+))?$").unwrap();
    static ref COMPLEMENT: Regex = Regex::new(r"(?i)^complement(?:\s+(\S+))?$").unwrap();
    static ref SIMPLIFY: Regex = Regex::new(r"(?i)^simplify(?:\s+(.*))?$").unwrap();
    static ref GATE: Regex = Regex::new(r"(?i)^gate\s+(\w+)\s+(\w+)(?:\s+(\w+))?$").unwrap();
    static ref TRUTH_TABLE: Regex = Regex::new(r"(?i)^truth\s+table$").unwrap();
    static ref FLIP_FLOP: Regex = Regex::new(r"(?i)^flipflop\s+(\w+)$").unwrap();
    static ref CLOCK: Regex = Regex::new(r"(?i)^clock((?:\s+\w+)*)$").unwrap();
    static ref RESET: Regex = Regex::new(r"(?i)^reset$").unwrap();
    static ref STATE: Regex = Regex::new(r"(?i)^state$").unwrap();
    static ref CHARACTERISTIC: Regex = Regex::new(r"(?i)^characteristic\s+(\w+)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Convert { digits: String, radix: Radix },
    Code { kind: CodeKind, bits: String },
    Ungray { bits: String },
    Complement { bits: String },
    Simplify { expression: String },
    Gate { kind: GateKind, a: bool, b: Option<bool> },
    TruthTable,
    SelectFlipFlop { kind: FlipFlopKind },
    Clock { inputs: Vec<bool> },
    Reset,
    State,
    Characteristic { kind: FlipFlopKind },
}

fn capture<'t>(captures: &Captures<'t>, group: usize) -> &'t str {
    captures.get(group).map_or("", |m| m.as_str())
}

/// Reads `0`/`1`, `true`/`false` or `high`/`low`.
pub fn parse_bool(text: &str, command: &str) -> Result<bool> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "true" | "high" => Ok(true),
        "0" | "false" | "low" => Ok(false),
        _ => Err(DigilogicError::parse(format!("Expected 0 or 1, found '{text}'"), command)),
    }
}

impl FromStr for Command {
    type Err = DigilogicError;
    fn from_str(command: &str) -> Result<Command> {
        let command = command.trim();
        if let Some(c) = CONVERT.captures(command) {
            return Ok(Command::Convert { digits: capture(&c, 1).to_string(), radix: capture(&c, 2).parse()? });
        }
        if let Some(c) = CODE.captures(command) {
            let bits = capture(&c, 2).to_string();
            let keyword = capture(&c, 1).to_ascii_lowercase();
            return Ok(match keyword.as_str() {
                "ungray" => Command::Ungray { bits },
                other => Command::Code { kind: other.parse()?, bits },
            });
        }
        if let Some(c) = COMPLEMENT.captures(command) {
            return Ok(Command::Complement { bits: capture(&c, 1).to_string() });
        }
        if let Some(c) = SIMPLIFY.captures(command) {
            return Ok(Command::Simplify { expression: capture(&c, 1).to_string() });
        }
        if let Some(c) = GATE.captures(command) {
            let kind: GateKind = capture(&c, 1).parse()?;
            let a = parse_bool(capture(&c, 2), command)?;
            let b = match c.get(3) {
                Some(m) => Some(parse_bool(m.as_str(), command)?),
                None if kind.arity() == 2 => {
                    return Err(DigilogicError::parse(format!("{kind} gate takes two inputs"), command));
                }
                None => None,
            };
            return Ok(Command::Gate { kind, a, b });
        }
        if TRUTH_TABLE.is_match(command) {
            return Ok(Command::TruthTable);
        }
        if let Some(c) = FLIP_FLOP.captures(command) {
            return Ok(Command::SelectFlipFlop { kind: capture(&c, 1).parse()? });
        }
        if let Some(c) = CLOCK.captures(command) {
            let inputs = capture(&c, 1)
                .split_whitespace()
                .map(|value| parse_bool(value, command))
                .collect::<Result<Vec<bool>>>()?;
            return Ok(Command::Clock { inputs });
        }
        if RESET.is_match(command) {
            return Ok(Command::Reset);
        }
        if STATE.is_match(command) {
            return Ok(Command::State);
        }
        if let Some(c) = CHARACTERISTIC.captures(command) {
            return Ok(Command::Characteristic { kind: capture(&c, 1).parse()? });
        }
        Err(DigilogicError::parse(format!("Unrecognized command '{command}'"), command))
    }
}

/// Tabular outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
}

impl CollectedResult {
    fn new(columns: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self { columns: columns.iter().map(|c| c.to_string()).collect(), row_count: rows.len(), rows }
    }
    fn single(columns: &[&str], row: Vec<String>) -> Self {
        Self::new(columns, vec![row])
    }
    /// Value in the first row under `column`, if both exist.
    pub fn value(&self, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.first()?.get(index).map(String::as_str)
    }
}

fn bit(value: bool) -> String {
    (if value { "1" } else { "0" }).to_string()
}

fn flip_flop_row(flip_flop: &FlipFlop) -> Vec<String> {
    vec![flip_flop.kind.to_string(), bit(flip_flop.state)]
}

pub struct Engine<'en> {
    workbench: &'en Workbench,
}

impl<'en> Engine<'en> {
    pub fn new(workbench: &'en Workbench) -> Self {
        Self { workbench }
    }

    fn split(script: &str) -> impl Iterator<Item = &str> {
        script.split(';').map(str::trim).filter(|command| !command.is_empty())
    }

    /// Runs every command of `script`, printing results and logging failures.
    pub fn execute(&self, script: &str) {
        for command in Self::split(script) {
            match self.run(command) {
                Ok(result) => {
                    println!("{}", result.columns.join("\t"));
                    for row in &result.rows {
                        println!("{}", row.join("\t"));
                    }
                }
                Err(e) => warn!(error = %e, %command, "command failed"),
            }
        }
    }

    /// Runs every command of `script` and returns the result of the last one.
    /// Stops at the first failing command.
    pub fn execute_collect(&self, script: &str) -> Result<CollectedResult> {
        let mut last = None;
        for command in Self::split(script) {
            last = Some(self.run(command)?);
        }
        last.ok_or(DigilogicError::EmptyInput)
    }

    fn run(&self, text: &str) -> Result<CollectedResult> {
        let limit = self.workbench.settings().max_input_length;
        if text.chars().count() > limit {
            let head: String = text.chars().take(32).collect();
            return Err(DigilogicError::parse(format!("Command longer than {limit} characters"), &head));
        }
        let started = Instant::now();
        let command: Command = text.parse()?;
        let result = self.apply(command)?;
        debug!(command = text, rows = result.row_count, elapsed_us = started.elapsed().as_micros() as u64, "command executed");
        Ok(result)
    }

    pub fn apply(&self, command: Command) -> Result<CollectedResult> {
        let grouped = |code: BitString| {
            if self.workbench.settings().group_nibbles { group_nibbles(code.as_str()) } else { code.into_string() }
        };
        Ok(match command {
            Command::Convert { digits, radix } => {
                let conversion = convert(&digits, radix)?;
                CollectedResult::single(
                    &["binary", "decimal", "octal", "hexadecimal"],
                    vec![conversion.binary, conversion.decimal, conversion.octal, conversion.hexadecimal],
                )
            }
            Command::Code { kind: CodeKind::Gray, bits } => {
                CollectedResult::single(&["code"], vec![codes::transcode(CodeKind::Gray, &bits)?.into_string()])
            }
            Command::Code { kind, bits } => CollectedResult::single(&["code"], vec![grouped(codes::transcode(kind, &bits)?)]),
            Command::Ungray { bits } => {
                CollectedResult::single(&["binary"], vec![from_gray(&BitString::parse(&bits)?).into_string()])
            }
            Command::Complement { bits } => {
                let complements = complement_text(&bits)?;
                CollectedResult::single(&["ones", "twos"], vec![complements.ones, complements.twos])
            }
            Command::Simplify { expression } => {
                let simplification = simplify_traced(&expression)?;
                CollectedResult::single(&["simplified", "rules"], vec![simplification.output, simplification.applied.join(", ")])
            }
            Command::Gate { kind, a, b } => CollectedResult::single(&["output"], vec![bit(evaluate(kind, a, b))]),
            Command::TruthTable => {
                let rows = truth_table()
                    .iter()
                    .map(|row| {
                        let mut cells = vec![bit(row.a), bit(row.b)];
                        cells.extend(GateKind::ALL.iter().map(|kind| bit(row.output(*kind))));
                        cells
                    })
                    .collect();
                CollectedResult::new(&["a", "b", "and", "or", "not", "nand", "nor", "xor", "xnor"], rows)
            }
            Command::SelectFlipFlop { kind } => CollectedResult::single(&["kind", "state"], flip_flop_row(&self.workbench.select(kind))),
            Command::Clock { inputs } => {
                let (before, after) = self.workbench.clock_values(&inputs)?;
                CollectedResult::single(&["kind", "current", "next"], vec![after.kind.to_string(), bit(before.state), bit(after.state)])
            }
            Command::Reset => CollectedResult::single(&["kind", "state"], flip_flop_row(&self.workbench.reset())),
            Command::State => CollectedResult::single(&["kind", "state"], flip_flop_row(&self.workbench.flip_flop())),
            Command::Characteristic { kind } => {
                let rows = characteristic_table(kind)
                    .iter()
                    .map(|row| vec![row.inputs.to_string(), bit(row.current), bit(row.next)])
                    .collect();
                CollectedResult::new(&["inputs", "current", "next"], rows)
            }
        })
    }
}
