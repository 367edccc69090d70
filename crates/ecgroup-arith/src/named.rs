//! Named curve parameters.

#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};

use crate::curve::Curve;
use crate::point::Point;

/// The secp256k1 field prime p = 2^256 - 2^32 - 977.
/// Represented as 4 x 64-bit limbs in little-endian order.
const SECP256K1_P: [u64; 4] = [
    0xFFFFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
];

/// Generator point G (affine x-coordinate).
const SECP256K1_GX: [u64; 4] = [
    0x59F2815B16F81798,
    0x029BFCDB2DCE28D9,
    0x55A06295CE870B07,
    0x79BE667EF9DCBBAC,
];

/// Generator point G (affine y-coordinate).
const SECP256K1_GY: [u64; 4] = [
    0x9C47D08FFB10D4B8,
    0xFD17B448A6855419,
    0x5DA4FBFC0E1108A8,
    0x483ADA7726A3C465,
];

fn from_limbs(limbs: &[u64; 4]) -> BigInt {
    let bytes: Vec<u8> = limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect();
    BigInt::from(BigUint::from_bytes_le(&bytes))
}

/// secp256k1: y² = x³ + 7 over GF(2^256 - 2^32 - 977).
pub fn secp256k1() -> Arc<Curve> {
    Arc::new(Curve {
        a: BigInt::from(0),
        b: BigInt::from(7),
        p: from_limbs(&SECP256K1_P),
    })
}

/// secp256k1 generator G on a fresh curve handle.
pub fn secp256k1_generator() -> Point {
    Point::from_coordinates(
        from_limbs(&SECP256K1_GX),
        from_limbs(&SECP256K1_GY),
        &secp256k1(),
    )
}

/// Textbook curve y² = x³ + 2x + 3 over GF(7); its group has six elements.
pub fn toy() -> Arc<Curve> {
    Arc::new(Curve {
        a: BigInt::from(2),
        b: BigInt::from(3),
        p: BigInt::from(7),
    })
}

/// Curves selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamedCurve {
    Secp256k1,
    Toy,
}

impl NamedCurve {
    pub const ALL: [NamedCurve; 2] = [NamedCurve::Secp256k1, NamedCurve::Toy];

    pub fn name(&self) -> &'static str {
        match self {
            NamedCurve::Secp256k1 => "secp256k1",
            NamedCurve::Toy => "toy",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn curve(&self) -> Arc<Curve> {
        match self {
            NamedCurve::Secp256k1 => secp256k1(),
            NamedCurve::Toy => toy(),
        }
    }

    /// Standard generator, where the curve defines one.
    pub fn generator(&self) -> Option<Point> {
        match self {
            NamedCurve::Secp256k1 => Some(secp256k1_generator()),
            NamedCurve::Toy => None,
        }
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int::parse_integer;

    #[test]
    fn test_p_constant() {
        // Verify P is correct: 2^256 - 2^32 - 977
        let p = secp256k1();
        let expected = (BigInt::from(1) << 256) - (BigInt::from(1) << 32) - 977;
        assert_eq!(*p.p(), expected);

        let p_hex = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";
        let bytes = hex::decode(p_hex).unwrap();
        assert_eq!(p.p().to_bytes_be().1, bytes);
    }

    #[test]
    fn test_matches_textual_parameters() {
        let parsed = Curve::new(
            "0x0",
            "0x7",
            "0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
        )
        .unwrap();
        assert_eq!(*secp256k1(), parsed);

        let g = secp256k1_generator();
        assert_eq!(
            *g.x(),
            parse_integer("0x79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798")
                .unwrap()
        );
        assert_eq!(
            *g.y(),
            parse_integer("0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8")
                .unwrap()
        );
    }

    #[test]
    fn test_lookup() {
        assert_eq!(NamedCurve::from_name("secp256k1"), Some(NamedCurve::Secp256k1));
        assert_eq!(NamedCurve::from_name(" SECP256K1 "), Some(NamedCurve::Secp256k1));
        assert_eq!(NamedCurve::from_name("toy"), Some(NamedCurve::Toy));
        assert_eq!(NamedCurve::from_name("p256"), None);

        for curve in NamedCurve::ALL {
            assert_eq!(NamedCurve::from_name(&curve.to_string()), Some(curve));
        }
    }

    #[test]
    fn test_generators() {
        let g = NamedCurve::Secp256k1.generator().unwrap();
        assert!(g.is_on_curve());
        assert_eq!(**g.curve(), *NamedCurve::Secp256k1.curve());
        assert!(NamedCurve::Toy.generator().is_none());
    }
}
