use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::BigInt;

use crate::error::{DigilogicError, Result};
use crate::radix::{validate_digits, Radix};

/// A validated, non-empty string of binary digits, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString(String);

impl BitString {
    pub fn parse(text: &str) -> Result<BitString> {
        validate_digits(text, Radix::Binary)?;
        Ok(BitString(text.to_string()))
    }
    pub(crate) fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> BitString {
        BitString(bits.into_iter().map(|b| if b { '1' } else { '0' }).collect())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn bits(&self) -> impl DoubleEndedIterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }
    /// The unsigned value of the bits.
    pub fn magnitude(&self) -> BigInt {
        // every byte is 0 or 1, so parsing cannot fail
        BigInt::parse_bytes(self.0.as_bytes(), 2).unwrap_or_default()
    }
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BitString {
    type Err = DigilogicError;
    fn from_str(s: &str) -> Result<BitString> {
        BitString::parse(s)
    }
}

impl AsRef<str> for BitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
