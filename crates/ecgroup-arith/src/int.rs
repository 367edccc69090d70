//! Integer text handling and residue normalization.
//!
//! Numerals are accepted as plain decimal (`"12345"`) or `0x`-prefixed
//! hexadecimal (`"0xFFFFFC2F"`), each with an optional leading sign.

#![forbid(unsafe_code)]

use ecgroup_core::{Error, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;

/// Parse a decimal or `0x`-prefixed hexadecimal numeral.
pub fn parse_integer(text: &str) -> Result<BigInt> {
    let trimmed = text.trim();

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex_digits) => (16, hex_digits),
        None => (10, unsigned),
    };

    // BigUint::parse_bytes tolerates '_' separators, which are not numerals here.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::MalformedInput(text.to_string()));
    }

    let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| Error::MalformedInput(text.to_string()))?;

    let value = BigInt::from(magnitude);
    Ok(if negative { -value } else { value })
}

/// Reduce `value` into `[0, modulus)`.
///
/// Every reduction in the crate goes through here so the sign of the
/// residue never depends on the sign of the dividend. `modulus` must be
/// positive.
pub fn mod_nonneg(value: &BigInt, modulus: &BigInt) -> BigInt {
    debug_assert!(modulus.sign() == num_bigint::Sign::Plus);
    value.mod_floor(modulus)
}

/// Render as lowercase `0x`-prefixed hexadecimal (`-0x..` when negative).
pub fn to_hex(value: &BigInt) -> String {
    format!("{value:#x}")
}

/// Render as decimal.
pub fn to_decimal(value: &BigInt) -> String {
    value.to_str_radix(10)
}
