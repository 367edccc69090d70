//! Modular inverse via the extended Euclidean algorithm.

#![forbid(unsafe_code)]

use std::mem;

use ecgroup_core::{Error, Result};
use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::int::mod_nonneg;

/// Multiplicative inverse of `x` modulo `p`, in `[0, p)`.
///
/// `x` may be negative or larger than `p`; it is reduced first so the
/// remainder sequence ends at the non-negative gcd. Fails with
/// [`Error::NonInvertible`] when `gcd(x, p) != 1` and with
/// [`Error::InvalidModulus`] when `p <= 1`.
pub fn mod_inverse(x: &BigInt, p: &BigInt) -> Result<BigInt> {
    if p <= &BigInt::one() {
        return Err(Error::InvalidModulus(p.to_string()));
    }

    let mut old_r = mod_nonneg(x, p);
    let mut r = p.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    // Invariant: old_r ≡ old_s * x and r ≡ s * x (mod p).
    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        tracing::debug!(%x, %p, gcd = %old_r, "no modular inverse");
        return Err(Error::NonInvertible {
            value: x.to_string(),
            modulus: p.to_string(),
        });
    }

    Ok(mod_nonneg(&old_s, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int::parse_integer;

    fn int(v: i64) -> BigInt {
        BigInt::from(v)
    }

    fn secp256k1_p() -> BigInt {
        parse_integer("0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F").unwrap()
    }

    #[test]
    fn test_small_prime_table() {
        // Every unit mod 7 and its inverse.
        let expected = [(1, 1), (2, 4), (3, 5), (4, 2), (5, 3), (6, 6)];
        for (x, inv) in expected {
            assert_eq!(mod_inverse(&int(x), &int(7)).unwrap(), int(inv), "x = {x}");
        }
    }

    #[test]
    fn test_result_in_range() {
        let p = int(101);
        for x in 1..101 {
            let inv = mod_inverse(&int(x), &p).unwrap();
            assert!(inv >= BigInt::zero() && inv < p, "inverse of {x} out of range");
            assert_eq!(mod_nonneg(&(int(x) * &inv), &p), BigInt::one());
        }
    }

    #[test]
    fn test_negative_and_unreduced_input() {
        // -3 ≡ 4 (mod 7) and 4 * 2 = 8 ≡ 1
        assert_eq!(mod_inverse(&int(-3), &int(7)).unwrap(), int(2));
        // 10 ≡ 3 (mod 7)
        assert_eq!(mod_inverse(&int(10), &int(7)).unwrap(), int(5));
        assert_eq!(mod_inverse(&int(-11), &int(7)).unwrap(), int(5));
    }

    #[test]
    fn test_large_prime_matches_fermat() {
        let p = secp256k1_p();
        let exp = &p - int(2);
        let values = [
            "0x2",
            "0x79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
            "0xdeadbeefcafebabedeadbeefcafebabedeadbeefcafebabedeadbeefcafebabe",
            "-0x1234567890abcdef",
        ];

        for v in values {
            let x = parse_integer(v).unwrap();
            let ours = mod_inverse(&x, &p).unwrap();
            let fermat = mod_nonneg(&x, &p).modpow(&exp, &p);
            assert_eq!(ours, fermat, "mismatch for {v}");
            assert_eq!(mod_nonneg(&(&x * &ours), &p), BigInt::one());
        }
    }

    #[test]
    fn test_non_invertible() {
        assert_eq!(
            mod_inverse(&int(6), &int(9)),
            Err(Error::NonInvertible {
                value: "6".to_string(),
                modulus: "9".to_string(),
            })
        );
        assert!(mod_inverse(&int(0), &int(7)).is_err());
        assert!(mod_inverse(&int(14), &int(7)).is_err());
        assert!(mod_inverse(&secp256k1_p(), &secp256k1_p()).is_err());
    }

    #[test]
    fn test_invalid_modulus() {
        assert_eq!(
            mod_inverse(&int(3), &int(1)),
            Err(Error::InvalidModulus("1".to_string()))
        );
        assert!(mod_inverse(&int(3), &int(0)).is_err());
        assert!(mod_inverse(&int(3), &int(-7)).is_err());
    }

    #[test]
    fn test_composite_modulus_with_coprime_input() {
        // Only primality of p is assumed by callers; coprime pairs still work.
        assert_eq!(mod_inverse(&int(7), &int(15)).unwrap(), int(13));
    }
}
