//! # Euclidean Module
//!
//! gcd, extended gcd (Bezout coefficients), lcm and modular inverse, all
//! built on the iterative two-register update form rather than the
//! recursive textbook presentation — at cryptographic bit widths a naive
//! recursive gcd can overflow the call stack.

use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Greatest common divisor of `a` and `b`.
///
/// `(a, b) <- (b, a mod b)` until `b` is zero; the final `a` is the gcd.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let (mut a, mut b) = (a.clone(), b.clone());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Bezout coefficients: returns `(g, x, y)` with `a*x + b*y = g` and
/// `g = gcd(a, b)`.
///
/// Uses the iterative two-register update form (no recursion), which is
/// the only form that cannot overflow the stack at the multi-thousand-bit
/// widths the RSA and DH moduli reach.
pub fn gcdx(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let (mut a, mut b) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut x, mut y) = (BigInt::from(1), BigInt::from(0));
    let (mut x1, mut y1) = (BigInt::from(0), BigInt::from(1));

    while !b.is_zero() {
        let q = &a / &b;
        let r = &a - &q * &b;
        a = b;
        b = r;

        let x2 = &x - &q * &x1;
        x = x1;
        x1 = x2;

        let y2 = &y - &q * &y1;
        y = y1;
        y1 = y2;
    }

    let g = a
        .to_biguint()
        .expect("gcd of two unsigned values is non-negative");
    (g, x, y)
}

/// Least common multiple of `a` and `b`.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }
    (a * b) / gcd(a, b)
}

/// Modular inverse of `a` modulo `b`, normalized to `[0, b)`.
///
/// # Errors
///
/// Returns [`Error::NoInverse`] when `gcd(a, b) != 1`, i.e. `a` is not a
/// unit modulo `b`.
pub fn inverse(a: &BigUint, b: &BigUint) -> Result<BigUint> {
    let (g, x, _y) = gcdx(a, b);
    if !g.is_one() {
        return Err(Error::NoInverse);
    }
    let b_signed = BigInt::from(b.clone());
    let mut r = x.mod_floor(&b_signed);
    if r.is_negative() {
        r += &b_signed;
    }
    Ok(r.to_biguint().expect("normalized residue is non-negative"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_basic() {
        assert_eq!(gcd(&BigUint::from(48u32), &BigUint::from(18u32)), BigUint::from(6u32));
        assert_eq!(gcd(&BigUint::from(7u32), &BigUint::from(60u32)), BigUint::one());
    }

    #[test]
    fn test_gcdx_known_vector() {
        // gcdx(7, 60) = (1, -17, 2)
        let (g, x, y) = gcdx(&BigUint::from(7u32), &BigUint::from(60u32));
        assert_eq!(g, BigUint::one());
        assert_eq!(x, BigInt::from(-17));
        assert_eq!(y, BigInt::from(2));
    }

    #[test]
    fn test_gcdx_bezout_identity_holds() {
        let (a, b) = (BigUint::from(12345u32), BigUint::from(6789u32));
        let (g, x, y) = gcdx(&a, &b);
        let lhs = BigInt::from(a) * &x + BigInt::from(b) * &y;
        assert_eq!(lhs, BigInt::from(g));
    }

    #[test]
    fn test_inverse_known_vectors() {
        assert_eq!(
            inverse(&BigUint::from(7u32), &BigUint::from(60u32)).unwrap(),
            BigUint::from(43u32)
        );
        assert_eq!(
            inverse(&BigUint::from(60u32), &BigUint::from(7u32)).unwrap(),
            BigUint::from(2u32)
        );
    }

    #[test]
    fn test_inverse_of_non_unit_fails() {
        // gcd(4, 8) = 4 != 1
        assert!(matches!(
            inverse(&BigUint::from(4u32), &BigUint::from(8u32)),
            Err(Error::NoInverse)
        ));
    }

    #[test]
    fn test_lcm_basic() {
        assert_eq!(lcm(&BigUint::from(4u32), &BigUint::from(6u32)), BigUint::from(12u32));
    }

    #[test]
    fn test_inverse_round_trips_many() {
        for (a, n) in [(3u32, 11u32), (17, 3120), (65537, 3120)] {
            let a = BigUint::from(a);
            let n = BigUint::from(n);
            let inv = inverse(&a, &n).unwrap();
            assert_eq!((&a * &inv) % &n, BigUint::one());
        }
    }
}
