//! Short Weierstrass curve description.
//!
//! y² = x³ + ax + b over GF(p)

#![forbid(unsafe_code)]

use std::fmt;

use ecgroup_core::{Error, Result};
use num_bigint::BigInt;
use num_traits::One;

use crate::int::{mod_nonneg, parse_integer, to_hex};

/// Curve parameters `(a, b, p)`.
///
/// `p` is assumed prime and greater than 3; only `p > 1` is checked, so
/// that reductions are always defined. Equality is structural: two
/// instances built from the same parameters are interchangeable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Curve {
    pub(crate) a: BigInt,
    pub(crate) b: BigInt,
    pub(crate) p: BigInt,
}

impl Curve {
    /// Build a curve from three numerals (decimal or `0x` hex).
    pub fn new(a: &str, b: &str, p: &str) -> Result<Self> {
        Self::from_params(parse_integer(a)?, parse_integer(b)?, parse_integer(p)?)
    }

    /// Build a curve from parsed parameters.
    pub fn from_params(a: BigInt, b: BigInt, p: BigInt) -> Result<Self> {
        if p <= BigInt::one() {
            return Err(Error::InvalidModulus(p.to_string()));
        }
        Ok(Self { a, b, p })
    }

    pub fn a(&self) -> &BigInt {
        &self.a
    }

    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// Field modulus.
    pub fn p(&self) -> &BigInt {
        &self.p
    }

    /// Reduce into `[0, p)`.
    pub fn reduce(&self, value: &BigInt) -> BigInt {
        mod_nonneg(value, &self.p)
    }

    /// Check y² ≡ x³ + ax + b (mod p).
    pub fn contains(&self, x: &BigInt, y: &BigInt) -> bool {
        let lhs = self.reduce(&(y * y));
        let rhs = self.reduce(&(x * x * x + &self.a * x + &self.b));
        lhs == rhs
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a = {}, b = {}, p = {}",
            to_hex(&self.a),
            to_hex(&self.b),
            to_hex(&self.p)
        )
    }
}
