use serde::Serialize;

use crate::bits::BitString;
use crate::error::Result;

pub fn ones_complement(bits: &BitString) -> BitString {
    BitString::from_bits(bits.bits().map(|bit| !bit))
}

/// One's complement plus one, rippling the carry up from the least significant bit.
/// A carry out of the most significant bit becomes an extra leading `1`.
pub fn twos_complement(bits: &BitString) -> BitString {
    let mut carry = true;
    let mut sum: Vec<bool> = ones_complement(bits)
        .bits()
        .rev()
        .map(|bit| {
            let out = bit ^ carry;
            carry &= bit;
            out
        })
        .collect();
    if carry {
        sum.push(true);
    }
    BitString::from_bits(sum.into_iter().rev())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Complements {
    pub ones: String,
    pub twos: String,
}

/// Validates `text` as binary and computes both complements.
pub fn complement_text(text: &str) -> Result<Complements> {
    let bits = BitString::parse(text)?;
    Ok(Complements {
        ones: ones_complement(&bits).into_string(),
        twos: twos_complement(&bits).into_string(),
    })
}
