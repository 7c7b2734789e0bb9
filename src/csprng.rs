//! # CSPRNG
//!
//! Uniformly distributed integer sampling drawn from OS entropy. Every
//! random value consumed by a cryptographic operation in this crate —
//! DH/RSA/EC key generation, prime generation, Miller-Rabin witnesses,
//! ECDSA nonces — is ultimately drawn from [`randbits`], [`randbelow`]
//! or [`randrange`].
//!
//! `randbelow` rejection-samples rather than reducing modulo `n`: an
//! arithmetic-modulo shortcut biases the low end of the range whenever
//! `n` does not evenly divide the sampled space, which is disallowed here.

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::RngCore;
use zeroize::Zeroize;

/// Read `k` bits of OS entropy, interpreted big-endian, with any excess
/// bits above the `k`th shifted off so the result has exactly `k` bits
/// of entropy (though not necessarily a set top bit).
pub fn randbits(k: u64) -> BigUint {
    if k == 0 {
        return BigUint::zero();
    }
    let num_bytes = ((k + 7) / 8) as usize;
    let mut buf = vec![0u8; num_bytes];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    let x = BigUint::from_bytes_be(&buf);
    buf.zeroize();
    let excess = (num_bytes as u64) * 8 - k;
    x >> excess
}

/// Rejection-sample a uniformly distributed integer in `[0, n)`.
///
/// Draws `randbits(bitlen(n))` repeatedly, discarding any draw that is
/// `>= n`, until one falls in range. This preserves uniformity; reducing
/// a single draw modulo `n` would not, because bit_length(n) is rarely a
/// multiple of the sample space and the tail residues would be favored.
pub fn randbelow(n: &BigUint) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }
    let k = n.bits();
    loop {
        let r = randbits(k);
        if &r < n {
            return r;
        }
    }
}

/// Uniformly sample an integer in `[lo, hi)`.
///
/// # Panics
///
/// Panics if `hi <= lo`; this is a caller precondition, not a recoverable
/// runtime condition, matching the other kernel preconditions in this
/// crate that are asserted rather than threaded through `Result`.
pub fn randrange(lo: &BigUint, hi: &BigUint) -> BigUint {
    assert!(hi > lo, "randrange: hi must be greater than lo");
    lo + randbelow(&(hi - lo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_randbits_respects_bit_length() {
        for k in [1u64, 8, 64, 256, 1024] {
            let r = randbits(k);
            assert!(r.bits() <= k, "randbits({k}) produced {} bits", r.bits());
        }
    }

    #[test]
    fn test_randbelow_is_in_range() {
        let n = BigUint::from(1000u32);
        for _ in 0..256 {
            let r = randbelow(&n);
            assert!(r < n);
        }
    }

    #[test]
    fn test_randbelow_zero_is_zero() {
        assert_eq!(randbelow(&BigUint::zero()), BigUint::zero());
    }

    #[test]
    fn test_randrange_is_in_bounds() {
        let lo = BigUint::from(5u32);
        let hi = BigUint::from(10u32);
        for _ in 0..256 {
            let r = randrange(&lo, &hi);
            assert!(r >= lo && r < hi);
        }
    }

    #[test]
    #[should_panic]
    fn test_randrange_rejects_empty_interval() {
        let x = BigUint::one();
        randrange(&x, &x);
    }

    #[test]
    fn test_randbits_not_constant() {
        // Not a statistical test, just a sanity check that we are not
        // returning a fixed value.
        let a = randbits(256);
        let b = randbits(256);
        assert_ne!(a, b);
    }
}
