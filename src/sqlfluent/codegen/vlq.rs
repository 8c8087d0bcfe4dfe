//! Base64 VLQ, the number encoding used by source map `mappings`
//!
//! Each value is split into 5 bit groups, least significant first. The sign goes in the
//! lowest bit of the first group and bit 6 of every digit flags a continuation.

use thiserror::Error;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const SHIFT: u32 = 5;
const MASK: i64 = 0b1_1111;
const CONTINUATION: i64 = 0b10_0000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VlqError {
    #[error("invalid base64 digit {0:?}")]
    InvalidDigit(char),
    #[error("value ends in the middle of a continuation")]
    Truncated,
    #[error("value does not fit in 64 bits")]
    Overflow,
}

pub fn encode(value: i64, out: &mut String) {
    let mut vlq = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };

    loop {
        let mut digit = vlq & MASK;
        vlq >>= SHIFT;
        if vlq > 0 {
            digit |= CONTINUATION;
        }
        out.push(ALPHABET[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

fn digit_value(ch: char) -> Result<i64, VlqError> {
    ALPHABET
        .iter()
        .position(|&candidate| candidate as char == ch)
        .map(|index| index as i64)
        .ok_or(VlqError::InvalidDigit(ch))
}

/// Decode one value from the front of `chars`
pub fn decode<I>(chars: &mut I) -> Result<i64, VlqError>
where
    I: Iterator<Item = char>,
{
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let ch = chars.next().ok_or(VlqError::Truncated)?;
        let digit = digit_value(ch)?;
        if shift > 60 {
            return Err(VlqError::Overflow);
        }
        result |= (digit & MASK) << shift;
        shift += SHIFT;
        if digit & CONTINUATION == 0 {
            break;
        }
    }

    let magnitude = result >> 1;
    Ok(if result & 1 == 1 { -magnitude } else { magnitude })
}
