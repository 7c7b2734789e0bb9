//! # Hash Capability
//!
//! The DH, RSA and EC modules all need to collapse a raw shared secret or
//! message into a fixed-width digest before it is safe to use as a key or
//! a signature input. Rather than accepting anything duck-typed, callers
//! inject a type implementing [`Hasher`]; [`Sha256Hasher`] is the default
//! used throughout the crate when no caller-supplied hasher is given.

use sha2::{Digest, Sha256};

/// A resettable digest function: feed it bytes, then ask for the digest.
///
/// Implementors own their internal state machine; [`Hasher::digest`]
/// consumes `self` so a finalized hasher cannot be fed more input and
/// re-finalized, which would silently compute a different digest than
/// the caller expects.
pub trait Hasher {
    /// Absorb more input bytes.
    fn update(&mut self, bytes: &[u8]);

    /// Finalize and return the digest bytes.
    fn digest(self) -> Vec<u8>;
}

/// SHA-256 implementation of [`Hasher`]; the default everywhere a hash
/// object is injectable (DH session derivation, ECDH session derivation,
/// RSA key encapsulation, RSA-FDH, ECDSA message hashing).
#[derive(Default)]
pub struct Sha256Hasher(Sha256);

impl Sha256Hasher {
    /// Construct a fresh hasher with no input absorbed yet.
    pub fn new() -> Self {
        Self(Sha256::new())
    }
}

impl Hasher for Sha256Hasher {
    fn update(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.0, bytes);
    }

    fn digest(self) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

/// Hash a single byte slice with a fresh instance of `H`.
///
/// Convenience for the common case of "hash this one buffer," used by
/// `ECDSA`'s message-to-integer mapping and RSA's key-encapsulation digest.
pub fn digest_with<H: Hasher + Default>(bytes: &[u8]) -> Vec<u8> {
    let mut h = H::default();
    h.update(bytes);
    h.digest()
}

/// Hash `bytes` with the default [`Sha256Hasher`].
pub fn digest(bytes: &[u8]) -> Vec<u8> {
    digest_with::<Sha256Hasher>(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256("abc")
        let d = digest(b"abc");
        assert_eq!(
            hex::encode(d),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_deterministic() {
        assert_eq!(digest(b"same input"), digest(b"same input"));
        assert_ne!(digest(b"input a"), digest(b"input b"));
    }
}
