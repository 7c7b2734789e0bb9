//! # Diffie-Hellman Module
//!
//! Key agreement over a prime-order multiplicative subgroup of `Z_p^*`.
//! Parameters `(q, p, g)` describe a subgroup of order `q` generated by
//! `g`; every public key received from a peer MUST pass
//! [`validate_pub_key`] before it is used, which is what defends against
//! small-subgroup confinement attacks.
//!
//! ## Parameter generation
//!
//! 1. Draw `q`, a 256-bit prime.
//! 2. Search for `n, p` with `p = q*n + 1` prime, `p` of the requested
//!    bit length.
//! 3. Search for a generator `g` of the order-`q` subgroup: sample
//!    `a in [2, p-2]`, set `g = a^n mod p`; accept if `g != 1`.

use crate::error::{Error, Result};
use crate::hash::{Hasher, Sha256Hasher};
use crate::kernel::{fast_mod_exp, generate_prime, is_prime};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Bit length of the subgroup order `q`.
const Q_BIT_LEN: u64 = 256;

/// Allowed bit lengths for the modulus `p`.
const ALLOWED_P_BIT_LENS: [u64; 2] = [2048, 3072];

/// Retry budget, in multiples of `p_bit_len`, for the `p = qn + 1` search.
const P_SEARCH_RETRY_FACTOR: u64 = 100;

/// A validated DH parameter bundle: the subgroup modulus `p`, its prime
/// order `q`, and generator `g`. Entirely public — these are meant to be
/// shared between peers (and re-exported by a PEM/DER wrapper layer; see
/// module docs on [`crate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DHParameters {
    /// Prime order of the generated subgroup (256 bits).
    pub q: BigUint,
    /// Prime modulus, `p = q*n + 1` for some even `n`.
    pub p: BigUint,
    /// Generator of the order-`q` subgroup.
    pub g: BigUint,
}

/// A DH keypair: a secret exponent `x` and its public counterpart
/// `y = g^x mod p`. `x` is zeroized on drop; equality is intentionally
/// not derived (see [`DHKey::dangerous_eq_with_secret`]).
#[derive(Debug, Clone)]
pub struct DHKey {
    params: DHParameters,
    x: BigUint,
    y: BigUint,
}

impl Drop for DHKey {
    fn drop(&mut self) {
        self.x.set_zero();
    }
}

impl DHKey {
    /// The public component `y = g^x mod p`.
    pub fn public_key(&self) -> &BigUint {
        &self.y
    }

    /// The parameter bundle this key was generated under.
    pub fn parameters(&self) -> &DHParameters {
        &self.params
    }

    /// Compare two keys field-by-field, **including the secret scalar**.
    ///
    /// Not constant-time and not used anywhere in this crate outside
    /// tests; exists only so test code can assert full key equality
    /// without every key object deriving `PartialEq` over secret state
    /// by default (see the crate's design notes on opaque key objects).
    #[doc(hidden)]
    pub fn dangerous_eq_with_secret(&self, other: &DHKey) -> bool {
        self.params == other.params && self.x == other.x && self.y == other.y
    }
}

/// Generate a fresh, validated parameter bundle with modulus bit length
/// `p_bit_len` (must be 2048 or 3072).
///
/// # Errors
///
/// [`Error::InvalidParameters`] if `p_bit_len` is not an allowed size;
/// [`Error::GenerationFailure`] if the bounded search for `p` or `g`
/// is exhausted.
pub fn generate_parameters(p_bit_len: u64) -> Result<DHParameters> {
    if !ALLOWED_P_BIT_LENS.contains(&p_bit_len) {
        return Err(Error::invalid_params(format!(
            "p_bit_len must be one of {ALLOWED_P_BIT_LENS:?}, got {p_bit_len}"
        )));
    }
    tracing::debug!(p_bit_len, "generating DH parameters");
    let q = generate_prime(Q_BIT_LEN)?;
    let (n, p) = generate_p(&q, p_bit_len)?;
    let g = generate_g(&n, &p)?;
    tracing::info!(p_bit_len, "DH parameters generated");
    Ok(DHParameters { q, p, g })
}

fn generate_p(q: &BigUint, p_bit_len: u64) -> Result<(BigUint, BigUint)> {
    let n_bit_len = p_bit_len - Q_BIT_LEN;
    let lo = BigUint::one() << (n_bit_len - 1);
    let hi = BigUint::one() << n_bit_len;
    let tries = P_SEARCH_RETRY_FACTOR * p_bit_len;

    for _ in 0..tries {
        let n = crate::csprng::randrange(&lo, &hi);
        if n.is_odd() {
            continue;
        }
        let p = &n * q + BigUint::one();
        if p.bits() != p_bit_len {
            continue;
        }
        if is_prime(&p)? {
            return Ok((n, p));
        }
    }
    tracing::warn!(p_bit_len, tries, "exhausted retry budget searching for p = qn+1");
    Err(Error::generation_failure(format!(
        "no {p_bit_len}-bit p = qn+1 found in {tries} tries"
    )))
}

fn generate_g(n: &BigUint, p: &BigUint) -> Result<BigUint> {
    let two = BigUint::from(2u32);
    // randrange is exclusive of its upper bound; p-1 here yields a in
    // [2, p-2], matching the inclusive range the parameter search wants.
    let upper = p - BigUint::one();
    let tries = P_SEARCH_RETRY_FACTOR * p.bits();
    for _ in 0..tries {
        let a = crate::csprng::randrange(&two, &upper);
        let g = fast_mod_exp(&a, n, p)?;
        if g != BigUint::one() {
            return Ok(g);
        }
    }
    Err(Error::generation_failure(
        "no generator found for the order-q subgroup",
    ))
}

/// Generate a keypair under the given parameters: `x` uniform in
/// `[1, q-1]`, `y = g^x mod p`.
pub fn generate_keypair(params: &DHParameters) -> Result<DHKey> {
    let x = crate::csprng::randrange(&BigUint::one(), &params.q);
    let y = fast_mod_exp(&params.g, &x, &params.p)?;
    validate_pub_key(&y, params)?;
    Ok(DHKey {
        params: params.clone(),
        x,
        y,
    })
}

/// Derive the shared session key with the default SHA-256 hasher.
///
/// See [`generate_session_key_with`] to inject a different [`Hasher`].
pub fn generate_session_key(y_peer: &BigUint, key: &DHKey) -> Result<Vec<u8>> {
    generate_session_key_with(y_peer, key, Sha256Hasher::new())
}

/// Derive `H((y_peer)^x mod p)`. The raw shared secret is always hashed
/// before being returned — using it directly would leak the subgroup
/// structure into the session key.
pub fn generate_session_key_with<H: Hasher>(
    y_peer: &BigUint,
    key: &DHKey,
    hasher: H,
) -> Result<Vec<u8>> {
    validate_pub_key(y_peer, &key.params)?;
    let k_i = fast_mod_exp(y_peer, &key.x, &key.params.p)?;
    Ok(crate::kernel::digest_int(&k_i, hasher))
}

/// Validate a peer's public key: `y in [2, p-1]` and `y^q mod p = 1`.
///
/// Both checks are mandatory on every externally received public key;
/// skipping either reopens the small-subgroup confinement attack this
/// module exists to close.
pub fn validate_pub_key(y: &BigUint, params: &DHParameters) -> Result<()> {
    let two = BigUint::from(2u32);
    let p_minus_1 = &params.p - BigUint::one();
    if y < &two || y > &p_minus_1 {
        return Err(Error::invalid_key("y not in range [2, p-1]"));
    }
    if fast_mod_exp(y, &params.q, &params.p)? != BigUint::one() {
        return Err(Error::invalid_key("y^q mod p != 1"));
    }
    Ok(())
}

/// Validate a parameter bundle: `p`'s bit length is allowed, `q` is 256
/// bits, both are prime, `q` divides `p-1`, `g != 1`, and `g^q mod p = 1`.
pub fn validate_parameters(params: &DHParameters) -> Result<()> {
    if !ALLOWED_P_BIT_LENS.contains(&params.p.bits()) {
        return Err(Error::invalid_params(format!(
            "p has bit length {}, expected one of {ALLOWED_P_BIT_LENS:?}",
            params.p.bits()
        )));
    }
    if params.q.bits() != Q_BIT_LEN {
        return Err(Error::invalid_params(format!(
            "q has bit length {}, expected {Q_BIT_LEN}",
            params.q.bits()
        )));
    }
    if !is_prime(&params.p)? {
        return Err(Error::invalid_params("p is not prime"));
    }
    if !is_prime(&params.q)? {
        return Err(Error::invalid_params("q is not prime"));
    }
    let p_minus_1 = &params.p - BigUint::one();
    if !(&p_minus_1 % &params.q).is_zero() {
        return Err(Error::invalid_params("q does not divide p-1"));
    }
    if params.g == BigUint::one() {
        return Err(Error::invalid_params("g must not be 1"));
    }
    if fast_mod_exp(&params.g, &params.q, &params.p)? != BigUint::one() {
        return Err(Error::invalid_params("g^q mod p != 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // NOTE: 2048/3072-bit parameter generation is slow; tests below use a
    // hand-rolled small parameter set satisfying every invariant except
    // the bit-length bounds, to exercise the algebra quickly, plus one
    // full-size generation test gated behind `--ignored`.

    fn toy_params() -> DHParameters {
        // q=11, p=23=2*11+1, g=9 has order 11 mod 23 since |Z_23*|=22=2*11.
        let q = BigUint::from(11u32);
        let p = BigUint::from(23u32);
        let g = BigUint::from(9u32);
        DHParameters { q, p, g }
    }

    #[test]
    fn test_toy_parameters_validate() {
        let params = toy_params();
        assert_eq!(fast_mod_exp(&params.g, &params.q, &params.p).unwrap(), BigUint::one());
        let p_minus_1 = &params.p - BigUint::one();
        assert!((&p_minus_1 % &params.q).is_zero());
    }

    #[test]
    fn test_keypair_and_session_key_agree() {
        let params = toy_params();
        let alice = generate_keypair(&params).unwrap();
        let bob = generate_keypair(&params).unwrap();

        let k_alice = generate_session_key(bob.public_key(), &alice).unwrap();
        let k_bob = generate_session_key(alice.public_key(), &bob).unwrap();
        assert_eq!(k_alice, k_bob);
    }

    #[test]
    fn test_validate_pub_key_rejects_out_of_range() {
        let params = toy_params();
        assert!(validate_pub_key(&BigUint::one(), &params).is_err());
        assert!(validate_pub_key(&params.p, &params).is_err());
    }

    #[test]
    fn test_validate_parameters_rejects_bad_bundle() {
        let mut params = toy_params();
        params.g = BigUint::one();
        assert!(validate_parameters(&params).is_err());
    }

    #[test]
    #[ignore = "2048-bit parameter generation takes tens of seconds"]
    fn test_full_size_parameter_generation_round_trip() {
        let params = generate_parameters(2048).unwrap();
        validate_parameters(&params).unwrap();
        let alice = generate_keypair(&params).unwrap();
        let bob = generate_keypair(&params).unwrap();
        assert_eq!(
            generate_session_key(bob.public_key(), &alice).unwrap(),
            generate_session_key(alice.public_key(), &bob).unwrap()
        );
    }
}
