//! # EC Module
//!
//! Elliptic-curve point arithmetic, scalar multiplication, ECDH session
//! derivation, and ECDSA sign/verify over SECG short-Weierstrass curves.
//!
//! ## Active curve
//!
//! The source this is grounded on keeps a single process-wide mutable
//! "current curve," replaced by an explicit `new_curve` call. That
//! introduces exactly one race in an otherwise single-threaded, CPU-bound
//! design. This module instead threads an immutable [`EcContext`] through
//! every operation — the recommended redesign for a statically-typed
//! target — so two contexts for two different curves can coexist safely
//! without any caller-side serialization discipline.

pub mod curves;
pub mod point;

use crate::error::{Error, Result};
use crate::hash::{digest, Hasher, Sha256Hasher};
use crate::kernel::euclid::inverse;
use curves::Curve;
use num_bigint::BigUint;
use num_traits::{One, Zero};
pub use point::Point;

/// Default bound on the MOV/Frey-Ruck exclusion test's search range; the
/// curve is rejected if `p^B mod n == 1` for any `1 <= B < b_iters`.
const DEFAULT_MOV_ITERS: u64 = 100;

/// An immutable handle to a validated curve, threaded through every EC
/// operation instead of a process-wide mutable global.
#[derive(Debug, Clone)]
pub struct EcContext {
    curve: Curve,
}

impl EcContext {
    /// The curve this context was constructed for.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The curve's base point.
    pub fn generator(&self) -> Point {
        Point::affine(self.curve.gx.clone(), self.curve.gy.clone())
    }
}

/// Validate `curve` and wrap it in a context, running `b_iters` rounds
/// of the MOV/FR exclusion test (100 by default — see [`new_curve`]).
fn validate_curve_params(curve: &Curve, b_iters: u64) -> Result<()> {
    let p = &curve.p;
    for (name, v) in [("a", &curve.a), ("b", &curve.b), ("Gx", &curve.gx), ("Gy", &curve.gy)] {
        if v >= p {
            return Err(Error::invalid_params(format!("{name} not in [0, p-1]")));
        }
    }
    if &curve.n == p {
        return Err(Error::invalid_params("n must not equal p"));
    }

    let discriminant =
        (BigUint::from(4u32) * &curve.a * &curve.a * &curve.a + BigUint::from(27u32) * &curve.b * &curve.b) % p;
    if discriminant.is_zero() {
        return Err(Error::invalid_params("curve is singular (discriminant = 0)"));
    }

    let g = Point::affine(curve.gx.clone(), curve.gy.clone());
    if !point::on_curve(&g, curve) {
        return Err(Error::invalid_params("G is not on the curve"));
    }

    if !crate::kernel::is_prime(p)? {
        return Err(Error::invalid_params("p is not prime"));
    }
    if !crate::kernel::is_prime(&curve.n)? {
        return Err(Error::invalid_params("n is not prime"));
    }
    if point::scalar_mul(&curve.n, &g, curve)? != Point::Identity {
        return Err(Error::invalid_params("n*G != identity"));
    }

    let sqrt_p = p.sqrt();
    let expected_h = (&sqrt_p + BigUint::one()).pow(2) / &curve.n;
    if curve.h != expected_h {
        return Err(Error::invalid_params("cofactor h does not match floor((sqrt(p)+1)^2 / n)"));
    }
    let bound_exp = (p.bits() + 15) / 16; // ceil(bitlen(p) / 16)
    let bound = BigUint::one() << bound_exp;
    if curve.h > bound {
        return Err(Error::invalid_params("cofactor h exceeds its allowed bound"));
    }

    for b in 1..b_iters {
        let b = BigUint::from(b);
        if crate::kernel::fast_mod_exp(p, &b, &curve.n)? == BigUint::one() {
            return Err(Error::invalid_params(
                "curve fails MOV/FR exclusion test (susceptible to embedding-degree attack)",
            ));
        }
    }

    Ok(())
}

/// Replace the active curve: validates `curve` in full (discriminant,
/// primality, base-point order, cofactor bound, MOV/FR exclusion) and
/// returns a context for it. `b_iters` bounds the MOV/FR search (100
/// matches the source default; lower it only for curves you already
/// trust, to speed up repeated construction in tests).
pub fn new_curve(curve: Curve, b_iters: u64) -> Result<EcContext> {
    tracing::debug!(b_iters, "validating curve domain parameters");
    validate_curve_params(&curve, b_iters)?;
    tracing::info!("curve domain validated");
    Ok(EcContext { curve })
}

/// `new_curve` with the default MOV/FR iteration count
/// ([`DEFAULT_MOV_ITERS`]).
pub fn new_curve_default(curve: Curve) -> Result<EcContext> {
    new_curve(curve, DEFAULT_MOV_ITERS)
}

/// An EC keypair: secret scalar `d` and public point `Q = d*G`.
#[derive(Debug, Clone)]
pub struct ECKey {
    d: BigUint,
    q: Point,
}

impl Drop for ECKey {
    fn drop(&mut self) {
        self.d = BigUint::zero();
    }
}

impl ECKey {
    /// The public point `Q = d*G`.
    pub fn public_key(&self) -> &Point {
        &self.q
    }

    /// Compare two keys field-by-field, **including the secret scalar**.
    /// See [`crate::dh::DHKey::dangerous_eq_with_secret`] for why this
    /// is a separate, clearly named method rather than derived equality.
    #[doc(hidden)]
    pub fn dangerous_eq_with_secret(&self, other: &ECKey) -> bool {
        self.d == other.d && self.q == other.q
    }
}

fn validate_priv_key(d: &BigUint, n: &BigUint) -> bool {
    !d.is_zero() && d < n
}

/// Generate a keypair: `d` uniform in `[1, n)` (rejection-sampled),
/// `Q = d*G`.
pub fn generate_keypair(ctx: &EcContext) -> Result<ECKey> {
    let n = &ctx.curve.n;
    let d = loop {
        let candidate = crate::csprng::randbits(n.bits());
        if validate_priv_key(&candidate, n) {
            break candidate;
        }
    };
    let q = fast_point_at(&d, ctx)?;
    Ok(ECKey { d, q })
}

/// `d * G`, the public point corresponding to private scalar `d`.
///
/// # Errors
///
/// [`Error::ArithmeticError`] if `d` is not in `(0, n]`.
fn fast_point_at(d: &BigUint, ctx: &EcContext) -> Result<Point> {
    if d.is_zero() || d > &ctx.curve.n {
        return Err(Error::arithmetic("scalar must be in (0, n]"));
    }
    point::scalar_mul(d, &ctx.generator(), &ctx.curve)
}

/// Validate a received public key: not the identity, coordinates in
/// range, on the curve, and (when the cofactor exceeds 1) killed by
/// multiplication by `n` is the identity — i.e. `n*Q = I`.
pub fn validate_pub_key(q: &Point, ctx: &EcContext) -> Result<()> {
    let curve = &ctx.curve;
    let (x, y) = match q {
        Point::Identity => return Err(Error::invalid_key("public point is the identity")),
        Point::Affine { x, y } => (x, y),
    };
    if x >= &curve.p || y >= &curve.p {
        return Err(Error::invalid_key("coordinate out of range [0, p-1]"));
    }
    if !point::on_curve(q, curve) {
        return Err(Error::invalid_key("point is not on the curve"));
    }
    if curve.h > BigUint::one() && point::scalar_mul(&curve.n, q, curve)? != Point::Identity {
        return Err(Error::invalid_key("n*Q != identity"));
    }
    Ok(())
}

/// Derive the ECDH session key with the default SHA-256 hasher: only the
/// x-coordinate of `d*Q_peer` is hashed, matching the standard ECDH
/// output convention.
pub fn generate_session_key(q_peer: &Point, key: &ECKey, ctx: &EcContext) -> Result<Vec<u8>> {
    generate_session_key_with(q_peer, key, ctx, Sha256Hasher::new())
}

/// As [`generate_session_key`] but with an injectable [`Hasher`].
pub fn generate_session_key_with<H: Hasher>(
    q_peer: &Point,
    key: &ECKey,
    ctx: &EcContext,
    hasher: H,
) -> Result<Vec<u8>> {
    validate_pub_key(q_peer, ctx)?;
    let shared = point::scalar_mul(&key.d, q_peer, &ctx.curve)?;
    let x = shared
        .x()
        .ok_or_else(|| Error::arithmetic("d*Q_peer is the identity"))?;
    Ok(crate::kernel::digest_int(x, hasher))
}

/// Map message bytes to an integer representative no wider than `n`:
/// hash `m` (SHA-256, big-endian), then truncate by right-shifting off
/// any excess bits beyond `n`'s bit length.
fn hash_to_int(m: &[u8], n: &BigUint) -> BigUint {
    let h = BigUint::from_bytes_be(&digest(m));
    let n_bits = n.bits();
    let h_bits = h.bits();
    if h_bits <= n_bits {
        h
    } else {
        h >> (h_bits - n_bits)
    }
}

/// ECDSA sign: returns `(r, s)`.
pub fn sign(key: &ECKey, m: &[u8], ctx: &EcContext) -> Result<(BigUint, BigUint)> {
    let n = &ctx.curve.n;
    let e = hash_to_int(m, n);
    let d = &key.d;

    loop {
        let (k, r) = loop {
            let ephemeral = generate_keypair(ctx)?;
            let Some(x) = ephemeral.q.x() else { continue };
            let r = x % n;
            if !r.is_zero() {
                break (ephemeral.d.clone(), r);
            }
        };
        let k_inv = inverse(&k, n)?;
        let s = (&k_inv * (&e + d * &r)) % n;
        if !s.is_zero() {
            return Ok((r, s));
        }
    }
}

/// ECDSA verify: `true` iff `(r, s)` is a valid signature over `m` under
/// public key `Q`.
pub fn verify(q: &Point, m: &[u8], sig: &(BigUint, BigUint), ctx: &EcContext) -> Result<bool> {
    let (r, s) = sig;
    let n = &ctx.curve.n;
    if r.is_zero() || r >= n || s.is_zero() || s >= n {
        return Err(Error::invalid_key("r or s not in [1, n-1]"));
    }
    validate_pub_key(q, ctx)?;

    let e = hash_to_int(m, n);
    let s_inv = inverse(s, n)?;
    let u1 = (&e * &s_inv) % n;
    let u2 = (r * &s_inv) % n;

    let g = ctx.generator();
    let p1 = point::scalar_mul(&u1, &g, &ctx.curve)?;
    let p2 = point::scalar_mul(&u2, q, &ctx.curve)?;
    let r_pt = point::add(&p1, &p2, &ctx.curve)?;
    let Some(rx) = r_pt.x() else {
        return Ok(false);
    };
    Ok(&(rx % n) == r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> EcContext {
        new_curve_default(curves::secp256k1()).unwrap()
    }

    #[test]
    fn test_new_curve_validates_catalog_entries() {
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
            new_curve_default(c).unwrap();
        }
    }

    #[test]
    fn test_ecdh_session_keys_agree() {
        let ctx = ctx();
        let alice = generate_keypair(&ctx).unwrap();
        let bob = generate_keypair(&ctx).unwrap();
        let k_a = generate_session_key(bob.public_key(), &alice, &ctx).unwrap();
        let k_b = generate_session_key(alice.public_key(), &bob, &ctx).unwrap();
        assert_eq!(k_a, k_b);
    }

    #[test]
    fn test_ecdsa_round_trip() {
        let ctx = ctx();
        let key = generate_keypair(&ctx).unwrap();
        let msg = b"Sign and encrypt me!";
        let sig = sign(&key, msg, &ctx).unwrap();
        assert!(verify(key.public_key(), msg, &sig, &ctx).unwrap());
    }

    #[test]
    fn test_ecdsa_rejects_tampered_signature() {
        let ctx = ctx();
        let key = generate_keypair(&ctx).unwrap();
        let msg = b"message";
        let (r, s) = sign(&key, msg, &ctx).unwrap();
        let tampered = (r + BigUint::one(), s);
        assert!(!verify(key.public_key(), msg, &tampered, &ctx).unwrap());
    }

    #[test]
    fn test_ecdsa_rejects_tampered_message() {
        let ctx = ctx();
        let key = generate_keypair(&ctx).unwrap();
        let sig = sign(&key, b"message", &ctx).unwrap();
        assert!(!verify(key.public_key(), b"different message", &sig, &ctx).unwrap());
    }

    #[test]
    fn test_validate_pub_key_rejects_identity() {
        let ctx = ctx();
        assert!(validate_pub_key(&Point::Identity, &ctx).is_err());
    }
}
