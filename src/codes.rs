//! Code conversions from plain binary: reflected Gray code, Binary-Coded
//! Decimal and Excess-3.
//!
//! BCD and Excess-3 work on the *decimal* digits of the binary magnitude, each
//! digit becoming its own 4-bit group. Excess-3 adds three to every digit
//! first; the largest result is 9 + 3 = 12 (`1100`), so a group never needs
//! more than four bits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bits::BitString;
use crate::error::{DigilogicError, Result};
use crate::radix::{render_magnitude, Radix};

const GROUP_WIDTH: usize = 4;
const EXCESS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Gray,
    Bcd,
    Excess3,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodeKind::Gray => write!(f, "gray"),
            CodeKind::Bcd => write!(f, "bcd"),
            CodeKind::Excess3 => write!(f, "excess3"),
        }
    }
}

impl FromStr for CodeKind {
    type Err = DigilogicError;
    fn from_str(s: &str) -> Result<CodeKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gray" => Ok(CodeKind::Gray),
            "bcd" => Ok(CodeKind::Bcd),
            "excess3" | "excess-3" | "xs3" => Ok(CodeKind::Excess3),
            _ => Err(DigilogicError::parse(format!("Unknown code '{}'", s.trim()), s)),
        }
    }
}

pub fn to_gray(bits: &BitString) -> BitString {
    let mut previous = false;
    BitString::from_bits(bits.bits().map(|bit| {
        let gray = bit ^ previous;
        previous = bit;
        gray
    }))
}

/// Inverse of [`to_gray`]: each binary bit is the previous binary bit XOR the gray bit.
pub fn from_gray(gray: &BitString) -> BitString {
    let mut previous = false;
    BitString::from_bits(gray.bits().map(|g| {
        previous ^= g;
        previous
    }))
}

pub fn to_bcd(bits: &BitString) -> BitString {
    encode_decimal_digits(bits, 0)
}

pub fn to_excess3(bits: &BitString) -> BitString {
    encode_decimal_digits(bits, EXCESS)
}

fn encode_decimal_digits(bits: &BitString, excess: u32) -> BitString {
    let decimal = render_magnitude(&bits.magnitude(), Radix::Decimal);
    let mut encoded = String::with_capacity(decimal.len() * GROUP_WIDTH);
    for digit in decimal.chars().filter_map(|c| c.to_digit(10)) {
        let code = digit + excess;
        debug_assert!(code < 1 << GROUP_WIDTH);
        encoded.push_str(&format!("{:0width$b}", code, width = GROUP_WIDTH));
    }
    BitString::from_bits(encoded.bytes().map(|b| b == b'1'))
}

/// Validates `text` as binary and converts it to the requested code.
pub fn transcode(kind: CodeKind, text: &str) -> Result<BitString> {
    let bits = BitString::parse(text)?;
    Ok(match kind {
        CodeKind::Gray => to_gray(&bits),
        CodeKind::Bcd => to_bcd(&bits),
        CodeKind::Excess3 => to_excess3(&bits),
    })
}

/// Splits a code into space separated 4-bit groups, e.g. `0001 0000`.
/// A trailing group shorter than four bits is kept as is.
pub fn group_nibbles(code: &str) -> String {
    code.as_bytes()
        .chunks(GROUP_WIDTH)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
