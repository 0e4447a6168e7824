//! Conversion between the four number systems taught alongside digital logic:
//! binary, octal, decimal and hexadecimal.
//!
//! Magnitudes are unbounded ([`BigInt`]) so a 200 digit binary
//! string converts just as well as a byte. Signs are not supported; every
//! numeral is a non-negative magnitude.

use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::error::{DigilogicError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RadixRepr", into = "u32")]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub const ALL: [Radix; 4] = [Radix::Binary, Radix::Decimal, Radix::Octal, Radix::Hexadecimal];

    pub fn base(&self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }
    pub fn from_base(base: u32) -> Option<Radix> {
        match base {
            2 => Some(Radix::Binary),
            8 => Some(Radix::Octal),
            10 => Some(Radix::Decimal),
            16 => Some(Radix::Hexadecimal),
            _ => None,
        }
    }
    /// Value of a single digit in this radix, hex letters in either case.
    pub fn digit_value(&self, c: char) -> Option<u32> {
        c.to_digit(self.base())
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.base())
    }
}

impl FromStr for Radix {
    type Err = DigilogicError;
    fn from_str(s: &str) -> Result<Radix> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "2" | "bin" | "binary" => Ok(Radix::Binary),
            "8" | "oct" | "octal" => Ok(Radix::Octal),
            "10" | "dec" | "decimal" => Ok(Radix::Decimal),
            "16" | "hex" | "hexadecimal" => Ok(Radix::Hexadecimal),
            "" => Err(DigilogicError::EmptyInput),
            _ => Err(DigilogicError::parse(format!("Unsupported radix '{trimmed}'"), s)),
        }
    }
}

/// JSON form of a radix: the base as a number (`16`) or any name `FromStr` takes (`"hex"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RadixRepr {
    Base(u32),
    Name(String),
}

impl TryFrom<RadixRepr> for Radix {
    type Error = DigilogicError;
    fn try_from(repr: RadixRepr) -> Result<Radix> {
        match repr {
            RadixRepr::Base(base) => Radix::from_base(base)
                .ok_or_else(|| DigilogicError::parse(format!("Unsupported radix '{base}'"), &base.to_string())),
            RadixRepr::Name(name) => name.parse(),
        }
    }
}

impl From<Radix> for u32 {
    fn from(r: Radix) -> u32 {
        r.base()
    }
}

/// A magnitude together with the radix its digits were written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralValue {
    value: BigInt,
    radix: Radix,
}

impl NumeralValue {
    pub fn parse(digits: &str, radix: Radix) -> Result<NumeralValue> {
        validate_digits(digits, radix)?;
        let value = BigInt::parse_bytes(digits.as_bytes(), radix.base())
            .ok_or_else(|| DigilogicError::parse("Unparsable numeral", digits))?;
        Ok(NumeralValue { value, radix })
    }
    pub fn value(&self) -> &BigInt {
        &self.value
    }
    pub fn radix(&self) -> Radix {
        self.radix
    }
    /// Digits of the magnitude in `radix`, uppercase hex, no leading zeros.
    pub fn render(&self, radix: Radix) -> String {
        render_magnitude(&self.value, radix)
    }
}

pub(crate) fn render_magnitude(value: &BigInt, radix: Radix) -> String {
    value.to_str_radix(radix.base()).to_ascii_uppercase()
}

/// Checks that `digits` is non-empty and only uses characters valid in `radix`.
pub fn validate_digits(digits: &str, radix: Radix) -> Result<()> {
    if digits.is_empty() {
        return Err(DigilogicError::EmptyInput);
    }
    match digits.chars().enumerate().find(|(_, c)| radix.digit_value(*c).is_none()) {
        Some((position, digit)) => Err(DigilogicError::InvalidDigit { digit, position, radix: radix.base() }),
        None => Ok(()),
    }
}

/// The same magnitude written in all four radices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub binary: String,
    pub decimal: String,
    pub octal: String,
    pub hexadecimal: String,
}

impl Conversion {
    pub fn get(&self, radix: Radix) -> &str {
        match radix {
            Radix::Binary => &self.binary,
            Radix::Octal => &self.octal,
            Radix::Decimal => &self.decimal,
            Radix::Hexadecimal => &self.hexadecimal,
        }
    }
}

pub fn convert(digits: &str, source: Radix) -> Result<Conversion> {
    let numeral = NumeralValue::parse(digits, source)?;
    Ok(Conversion {
        binary: numeral.render(Radix::Binary),
        decimal: numeral.render(Radix::Decimal),
        octal: numeral.render(Radix::Octal),
        hexadecimal: numeral.render(Radix::Hexadecimal),
    })
}
