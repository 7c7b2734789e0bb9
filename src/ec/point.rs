//! # EC Point Arithmetic
//!
//! Group law over a short-Weierstrass curve `y^2 = x^3 + ax + b (mod p)`.
//! The point at infinity is a tagged variant rather than a sentinel
//! coordinate pair — on curves with `b = 0` (e.g. secp192k1, secp224k1)
//! `(0, 0)` is not on the curve, but a sentinel representation would make
//! that an awkward special case to keep straight from the real identity.

use crate::ec::curves::Curve;
use crate::error::Result;
use crate::kernel::euclid::inverse;
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};

/// A point on (or off) the curve: either the identity (point at
/// infinity) or an affine coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    /// The group's neutral element.
    Identity,
    /// An affine point `(x, y)`.
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    /// Construct an affine point.
    pub fn affine(x: BigUint, y: BigUint) -> Self {
        Point::Affine { x, y }
    }

    /// `true` if this is the identity element.
    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    /// The x-coordinate, if this is an affine point.
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Affine { x, .. } => Some(x),
            Point::Identity => None,
        }
    }

    /// The y-coordinate, if this is an affine point.
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Point::Affine { y, .. } => Some(y),
            Point::Identity => None,
        }
    }
}

/// Reduce a (possibly negative) `BigInt` into `[0, p)` and return it as
/// a `BigUint`.
fn reduce_mod(x: BigInt, p: &BigUint) -> BigUint {
    let p_signed = BigInt::from(p.clone());
    let mut r = x % &p_signed;
    if r.is_negative() {
        r += &p_signed;
    }
    r.to_biguint().expect("value reduced into [0, p) is non-negative")
}

/// Whether `pt` satisfies the curve equation. The identity is always
/// considered on-curve.
pub fn on_curve(pt: &Point, curve: &Curve) -> bool {
    let (x, y) = match pt {
        Point::Identity => return true,
        Point::Affine { x, y } => (x, y),
    };
    let lhs = (y * y) % &curve.p;
    let rhs = (x * x * x + &curve.a * x + &curve.b) % &curve.p;
    lhs == rhs
}

/// Additive inverse of a point: `(x, -y mod p)`.
pub fn negate(pt: &Point, curve: &Curve) -> Point {
    match pt {
        Point::Identity => Point::Identity,
        Point::Affine { x, y } => {
            let neg_y = reduce_mod(-BigInt::from(y.clone()), &curve.p);
            Point::Affine { x: x.clone(), y: neg_y }
        }
    }
}

/// Point doubling: slope `m = (3x^2 + a) * (2y)^-1 mod p`,
/// `x3 = m^2 - 2x mod p`, `y3 = m(x - x3) - y mod p`.
pub fn double(pt: &Point, curve: &Curve) -> Result<Point> {
    let (x, y) = match pt {
        Point::Identity => return Ok(Point::Identity),
        Point::Affine { x, y } => (x, y),
    };
    if y.is_zero() {
        // Tangent is vertical: P == -P, so 2P is the identity.
        return Ok(Point::Identity);
    }

    let p = &curve.p;
    let num = (BigUint::from(3u32) * x * x + &curve.a) % p;
    let den_inv = inverse(&((BigUint::from(2u32) * y) % p), p)?;
    let m = (num * den_inv) % p;

    let m_i = BigInt::from(m.clone());
    let x3 = reduce_mod(&m_i * &m_i - BigInt::from(2u32) * BigInt::from(x.clone()), p);
    let y3 = reduce_mod(
        &m_i * (BigInt::from(x.clone()) - BigInt::from(x3.clone())) - BigInt::from(y.clone()),
        p,
    );
    Ok(Point::Affine { x: x3, y: y3 })
}

/// Point addition per the chord-and-tangent law.
pub fn add(p1: &Point, p2: &Point, curve: &Curve) -> Result<Point> {
    let (x1, y1) = match p1 {
        Point::Identity => return Ok(p2.clone()),
        Point::Affine { x, y } => (x, y),
    };
    let (x2, y2) = match p2 {
        Point::Identity => return Ok(p1.clone()),
        Point::Affine { x, y } => (x, y),
    };

    if x1 == x2 {
        if y1 == y2 {
            return double(p1, curve);
        }
        // Shared x, distinct y: the chord is vertical, sum is identity.
        return Ok(Point::Identity);
    }

    let p = &curve.p;
    let dx = reduce_mod(BigInt::from(x2.clone()) - BigInt::from(x1.clone()), p);
    let dy_i = BigInt::from(y2.clone()) - BigInt::from(y1.clone());
    let inv_dx = inverse(&dx, p)?;
    let m = reduce_mod(dy_i * BigInt::from(inv_dx), p);

    let m_i = BigInt::from(m.clone());
    let x3 = reduce_mod(
        &m_i * &m_i - BigInt::from(x1.clone()) - BigInt::from(x2.clone()),
        p,
    );
    let y3 = reduce_mod(
        &m_i * (BigInt::from(x1.clone()) - BigInt::from(x3.clone())) - BigInt::from(y1.clone()),
        p,
    );
    Ok(Point::Affine { x: x3, y: y3 })
}

/// Left-to-right double-and-add scalar multiplication `k * base`.
///
/// Iterates the bits of `k` from the second-most-significant downward;
/// the accumulator starts at `base` (implicitly consuming the top bit),
/// doubling every iteration and adding the *original* `base` point
/// (not the running accumulator) whenever the current bit is set.
/// Runs in `O(log k)` curve operations.
pub fn scalar_mul(k: &BigUint, base: &Point, curve: &Curve) -> Result<Point> {
    if k.is_zero() || base.is_identity() {
        return Ok(Point::Identity);
    }
    let kbits = k.bits();
    let mut acc = base.clone();
    if kbits >= 2 {
        for i in (0..=kbits - 2).rev() {
            acc = double(&acc, curve)?;
            if k.bit(i) {
                acc = add(base, &acc, curve)?;
            }
        }
    }
    Ok(acc)
}

/// A slower, purely additive `k * base` used only for test cross-checks
/// against [`scalar_mul`].
pub fn scalar_mul_linear(k: &BigUint, base: &Point, curve: &Curve) -> Result<Point> {
    let mut acc = Point::Identity;
    let mut i = BigUint::zero();
    while &i < k {
        acc = add(&acc, base, curve)?;
        i += BigUint::from(1u32);
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::curves;

    fn test_curve_1() -> Curve {
        Curve {
            p: BigUint::from(17u32),
            a: BigUint::from(2u32),
            b: BigUint::from(2u32),
            gx: BigUint::from(5u32),
            gy: BigUint::from(1u32),
            n: BigUint::from(19u32),
            h: BigUint::from(1u32),
        }
    }

    #[test]
    fn test_c_test1_repeated_addition_table() {
        let curve = test_curve_1();
        let g = Point::affine(curve.gx.clone(), curve.gy.clone());
        let expected: [(u32, u32); 18] = [
            (5, 1), (6, 3), (10, 6), (3, 1), (9, 16), (16, 13), (0, 6), (13, 7),
            (7, 6), (7, 11), (13, 10), (0, 11), (16, 4), (9, 1), (3, 16), (10, 11),
            (6, 14), (5, 16),
        ];
        let mut acc = g.clone();
        for (i, (ex, ey)) in expected.iter().enumerate() {
            assert_eq!(acc, Point::affine(BigUint::from(*ex), BigUint::from(*ey)), "index {i}");
            acc = add(&acc, &g, &curve).unwrap();
        }
        // the 19th addition (order of G) yields the identity
        assert_eq!(acc, Point::Identity);
    }

    #[test]
    fn test_c_test1_scalar_mul_matches_repeated_addition() {
        let curve = test_curve_1();
        let g = Point::affine(curve.gx.clone(), curve.gy.clone());
        for k in 1u32..19 {
            let by_scalar = scalar_mul(&BigUint::from(k), &g, &curve).unwrap();
            let by_linear = scalar_mul_linear(&BigUint::from(k), &g, &curve).unwrap();
            assert_eq!(by_scalar, by_linear, "k={k}");
        }
    }

    #[test]
    fn test_c_test1_order_is_identity() {
        let curve = test_curve_1();
        let g = Point::affine(curve.gx.clone(), curve.gy.clone());
        assert_eq!(scalar_mul(&curve.n, &g, &curve).unwrap(), Point::Identity);
    }

    fn test_curve_2() -> Curve {
        Curve {
            p: BigUint::from(23u32),
            a: BigUint::from(1u32),
            b: BigUint::from(4u32),
            gx: BigUint::from(0u32),
            gy: BigUint::from(2u32),
            n: BigUint::from(29u32),
            h: BigUint::from(1u32),
        }
    }

    #[test]
    fn test_c_test2_order_is_identity() {
        let curve = test_curve_2();
        let g = Point::affine(curve.gx.clone(), curve.gy.clone());
        assert_eq!(scalar_mul(&curve.n, &g, &curve).unwrap(), Point::Identity);
    }

    #[test]
    fn test_identity_laws() {
        let curve = test_curve_1();
        let g = Point::affine(curve.gx.clone(), curve.gy.clone());
        assert_eq!(add(&g, &Point::Identity, &curve).unwrap(), g);
        assert_eq!(add(&Point::Identity, &g, &curve).unwrap(), g);
        assert_eq!(add(&Point::Identity, &Point::Identity, &curve).unwrap(), Point::Identity);
    }

    #[test]
    fn test_commutativity() {
        let curve = test_curve_1();
        let g = Point::affine(curve.gx.clone(), curve.gy.clone());
        let p2 = scalar_mul(&BigUint::from(2u32), &g, &curve).unwrap();
        let p5 = scalar_mul(&BigUint::from(5u32), &g, &curve).unwrap();
        assert_eq!(add(&p2, &p5, &curve).unwrap(), add(&p5, &p2, &curve).unwrap());
    }

    #[test]
    fn test_all_catalog_base_points_on_curve() {
        for c in [
            curves::secp192k1(),
            curves::secp192r1(),
            curves::secp224k1(),
            curves::secp224r1(),
            curves::secp256k1(),
            curves::secp256r1(),
            curves::secp384r1(),
            curves::secp521r1(),
        ] {
            let g = Point::affine(c.gx.clone(), c.gy.clone());
            assert!(on_curve(&g, &c));
        }
    }
}
