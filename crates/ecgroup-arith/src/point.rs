//! Points in affine coordinates and the chord-and-tangent group law.
//!
//! A point is either the identity (point at infinity) or an affine pair
//! (x, y) on a shared [`Curve`]. Points never change after construction;
//! every operation returns a fresh value.

#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

use ecgroup_core::{Error, Result};
use num_bigint::BigInt;
use num_traits::Zero;

use crate::curve::Curve;
use crate::int::{parse_integer, to_hex};
use crate::modinv::mod_inverse;

/// Point on a short Weierstrass curve.
/// `x` and `y` are meaningless when `is_identity` is set.
#[derive(Clone, Debug)]
pub struct Point {
    x: BigInt,
    y: BigInt,
    curve: Arc<Curve>,
    is_identity: bool,
}

impl Point {
    /// Point at infinity (identity element) on `curve`.
    pub fn identity(curve: &Arc<Curve>) -> Self {
        Self {
            x: BigInt::zero(),
            y: BigInt::zero(),
            curve: Arc::clone(curve),
            is_identity: true,
        }
    }

    /// Create point from affine coordinates.
    /// Does not validate that the point is on the curve.
    pub fn from_coordinates(x: BigInt, y: BigInt, curve: &Arc<Curve>) -> Self {
        Self {
            x,
            y,
            curve: Arc::clone(curve),
            is_identity: false,
        }
    }

    /// Parse an affine point from two numerals (decimal or `0x` hex).
    pub fn parse(x: &str, y: &str, curve: &Arc<Curve>) -> Result<Self> {
        Self::parse_with_identity(x, y, curve, false)
    }

    /// Parse a point, optionally flagged as the identity. The numerals are
    /// still validated when the flag is set.
    pub fn parse_with_identity(
        x: &str,
        y: &str,
        curve: &Arc<Curve>,
        identity: bool,
    ) -> Result<Self> {
        let x = parse_integer(x)?;
        let y = parse_integer(y)?;
        Ok(Self {
            x,
            y,
            curve: Arc::clone(curve),
            is_identity: identity,
        })
    }

    pub fn x(&self) -> &BigInt {
        &self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }

    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }

    pub fn is_identity(&self) -> bool {
        self.is_identity
    }

    /// Affine coordinates, or None for the identity.
    pub fn coordinates(&self) -> Option<(&BigInt, &BigInt)> {
        if self.is_identity {
            None
        } else {
            Some((&self.x, &self.y))
        }
    }

    /// Check y² ≡ x³ + ax + b (mod p).
    /// The identity is reported as on the curve.
    pub fn is_on_curve(&self) -> bool {
        self.is_identity || self.curve.contains(&self.x, &self.y)
    }

    fn same_curve(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &other.curve) || *self.curve == *other.curve
    }

    /// Negation: (x, -y mod p). The identity is its own negation.
    pub fn neg(&self) -> Self {
        if self.is_identity {
            return self.clone();
        }
        Self::from_coordinates(
            self.curve.reduce(&self.x),
            self.curve.reduce(&-&self.y),
            &self.curve,
        )
    }

    /// Point addition: P + Q.
    ///
    /// Fails with [`Error::CurveMismatch`] when the operands live on
    /// structurally different curves. A slope denominator without an
    /// inverse (composite modulus, or off-curve operands sharing an x
    /// coordinate) fails with [`Error::NonInvertible`].
    pub fn add(&self, other: &Self) -> Result<Self> {
        if !self.same_curve(other) {
            return Err(Error::CurveMismatch);
        }

        if self.is_identity {
            return Ok(other.clone());
        }
        if other.is_identity {
            return Ok(self.clone());
        }

        let curve = &self.curve;
        let p = curve.p();

        let x1 = curve.reduce(&self.x);
        let y1 = curve.reduce(&self.y);
        let x2 = curve.reduce(&other.x);
        let y2 = curve.reduce(&other.y);

        // Vertical line, including doubling a 2-torsion point (y = 0).
        if x1 == x2 && curve.reduce(&(&y1 + &y2)).is_zero() {
            tracing::trace!("vertical pair, result is identity");
            return Ok(Self::identity(curve));
        }

        let slope = if x1 == x2 && y1 == y2 {
            tracing::trace!("tangent slope");
            let numerator = BigInt::from(3) * &x1 * &x1 + curve.a();
            numerator * mod_inverse(&(BigInt::from(2) * &y1), p)?
        } else {
            tracing::trace!("chord slope");
            (&y2 - &y1) * mod_inverse(&(&x2 - &x1), p)?
        };
        let slope = curve.reduce(&slope);

        let xr = curve.reduce(&(&slope * &slope - &x1 - &x2));
        let yr = curve.reduce(&-(&slope * (&xr - &x1) + &y1));

        Ok(Self::from_coordinates(xr, yr, curve))
    }

    /// Point doubling: 2P.
    pub fn double(&self) -> Result<Self> {
        self.add(self)
    }
}

impl PartialEq for Point {
    /// Same curve, and either both identity or coordinates equal mod p.
    fn eq(&self, other: &Self) -> bool {
        if !self.same_curve(other) {
            return false;
        }
        match (self.is_identity, other.is_identity) {
            (true, true) => true,
            (false, false) => {
                let curve = &self.curve;
                curve.reduce(&self.x) == curve.reduce(&other.x)
                    && curve.reduce(&self.y) == curve.reduce(&other.y)
            }
            _ => false,
        }
    }
}

impl Eq for Point {}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity {
            f.write_str("identity")
        } else {
            write!(f, "({}, {})", to_hex(&self.x), to_hex(&self.y))
        }
    }
}
