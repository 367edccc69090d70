//! Arbitrary-precision arithmetic on short Weierstrass curves.
//!
//! Modular inverse by the extended Euclidean algorithm, and the affine
//! group law (identity, vertical cancellation, tangent doubling, chord
//! addition) over curves with parameters of any size.

#![forbid(unsafe_code)]

pub mod curve;
pub mod int;
pub mod modinv;
pub mod named;
pub mod point;

pub use curve::Curve;
pub use ecgroup_core::{Error, Result};
pub use modinv::mod_inverse;
pub use named::NamedCurve;
pub use point::Point;
