//! # Arithmetic Utilities
//!
//! Fast modular exponentiation (with a CRT-accelerated variant), CRT
//! encode/decode, and the digest helper used to collapse a raw integer
//! (a shared secret, an RSA encapsulation nonce) into hash output before
//! it is used as key material.

use crate::error::{Error, Result};
use crate::hash::Hasher;
use crate::kernel::euclid;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// `a^e mod n` via left-to-right square-and-multiply.
///
/// For `e` under 8 bits, a direct computation is used instead — the
/// loop overhead of square-and-multiply isn't worth it at that size,
/// and `BigUint::modpow` over a tiny exponent is exact either way.
///
/// # Errors
///
/// Returns [`Error::ArithmeticError`] if `n` is zero.
pub fn fast_mod_exp(a: &BigUint, e: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(Error::arithmetic("fast_mod_exp: modulus must be nonzero"));
    }

    if e.bits() < 8 {
        return Ok(a.modpow(e, n));
    }

    let ebits = e.bits();
    let mut result = if e.bit(0) { a % n } else { BigUint::one() };
    let mut base = a % n;
    for x in 1..ebits {
        base = (&base * &base) % n;
        if e.bit(x) {
            result = (&result * &base) % n;
        }
    }
    Ok(result)
}

/// Reduce `e` modulo `n - 1`, coercing a zero remainder back to `e` itself.
///
/// This mirrors the source algorithm's `_reduce` helper exactly: when
/// `e` is an exact multiple of `n - 1` the *unreduced* exponent is used
/// rather than `0`. See the crate-level design notes for why this is
/// preserved rather than "fixed" to return zero.
fn reduce_exponent(e: &BigUint, n: &BigUint) -> BigUint {
    let n_minus_1 = n - BigUint::one();
    let r = e % &n_minus_1;
    if r.is_zero() {
        e.clone()
    } else {
        r
    }
}

/// `a^e mod (p*q)` computed via Garner's formula (CRT-accelerated
/// exponentiation): `x_p = a^(e mod (p-1)) mod p`,
/// `x_q = a^(e mod (q-1)) mod q`, recombined by [`from_crt`].
///
/// About 4x faster than a direct `fast_mod_exp(a, e, p*q)` for RSA-sized
/// moduli because each partial exponentiation works over half-width
/// operands.
pub fn fast_mod_exp_crt(a: &BigUint, e: &BigUint, p: &BigUint, q: &BigUint) -> Result<BigUint> {
    let x_p = fast_mod_exp(a, &reduce_exponent(e, p), p)?;
    let x_q = fast_mod_exp(a, &reduce_exponent(e, q), q)?;
    from_crt(&x_p, &x_q, p, q)
}

/// Split `x` (implicitly reduced mod `p*q`) into its CRT residues
/// `(x mod p, x mod q)`.
pub fn to_crt(x: &BigUint, p: &BigUint, q: &BigUint) -> (BigUint, BigUint) {
    (x % p, x % q)
}

/// Recombine CRT residues `(x_p, x_q)` into `x mod (p*q)` via Garner's
/// formula: `r = (((x_p - x_q) * q^-1 mod p) mod p) * q + x_q`.
pub fn from_crt(x_p: &BigUint, x_q: &BigUint, p: &BigUint, q: &BigUint) -> Result<BigUint> {
    let q_mod_p = q % p;
    let inv = euclid::inverse(&q_mod_p, p)?;

    let p_signed = BigInt::from(p.clone());
    let diff = BigInt::from(x_p.clone()) - BigInt::from(x_q.clone());
    let mut t = (diff * BigInt::from(inv)).mod_floor(&p_signed);
    if t.is_negative() {
        t += &p_signed;
    }
    let t = t
        .to_biguint()
        .expect("Garner recombination residue is non-negative after mod_floor normalization");

    Ok(t * q + x_q)
}

/// Hash the decimal-string representation of `k` with `hasher`.
///
/// This matches the source behavior exactly: the integer is stringified
/// before hashing rather than converted to its big-endian byte string.
/// It is used to collapse a raw shared secret or encapsulation nonce
/// into fixed-width key material (DH and EC session derivation, RSA key
/// encapsulation).
pub fn digest_int<H: Hasher>(k: &BigUint, mut hasher: H) -> Vec<u8> {
    hasher.update(k.to_string().as_bytes());
    hasher.digest()
}

/// Big-endian byte serialization of a non-negative integer, using the
/// minimum number of bytes that hold its value (`ceil(bit_length / 8)`).
pub fn to_bytes_be(x: &BigUint) -> Vec<u8> {
    x.to_bytes_be()
}

/// Parse a big-endian byte string into a non-negative integer.
pub fn from_bytes_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Little-endian byte serialization, used internally only by RSA's
/// full-domain-hash message mapping (see [`crate::rsa`]); every other
/// byte/integer boundary in this crate is big-endian.
pub fn to_bytes_le(x: &BigUint) -> Vec<u8> {
    x.to_bytes_le()
}

/// Parse a little-endian byte string into a non-negative integer.
pub fn from_bytes_le(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}
