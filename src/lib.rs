//! # Keystone Core
//!
//! An arbitrary-precision arithmetic kernel and three interoperable
//! public-key primitives: Diffie-Hellman key agreement over a
//! prime-order multiplicative subgroup, RSA with paired signature and
//! encryption exponents, and elliptic-curve Diffie-Hellman plus ECDSA
//! over the SECG short-Weierstrass curve family.
//!
//! ## Module Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         KEYSTONE CORE MODULES                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐                     │
//! │  │     dh      │  │     rsa     │  │     ec      │                     │
//! │  │             │  │             │  │             │                     │
//! │  │ - params    │  │ - keygen    │  │ - curves    │                     │
//! │  │ - keypairs  │  │ - encap     │  │ - point law │                     │
//! │  │ - session   │  │ - sign/vfy  │  │ - ECDH/DSA  │                     │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘                     │
//! │         │                │                │                            │
//! │         └────────────────┴────────────────┘                            │
//! │                           │                                             │
//! │              ┌────────────┴────────────┐                                │
//! │              │          kernel          │                                │
//! │              │                          │                                │
//! │              │ fast_mod_exp / CRT       │◄── csprng (OS entropy)         │
//! │              │ gcd / gcdx / inverse     │◄── hash (Hasher trait)         │
//! │              │ Miller-Rabin / Fermat    │                                │
//! │              └──────────────────────────┘                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy (listing)
//!
//! - [`error`] - the error taxonomy shared by every module
//! - [`kernel`] - modular exponentiation, Euclidean algorithm, primality
//! - [`csprng`] - uniform integer sampling from OS entropy
//! - [`hash`] - the injectable [`hash::Hasher`] capability trait
//! - [`dh`] - Diffie-Hellman parameters, keys, and session derivation
//! - [`rsa`] - RSA key generation, key encapsulation, FDH sign/verify
//! - [`ec`] - curve catalog, point arithmetic, ECDH, ECDSA
//!
//! ## Security Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SECURITY LAYERS                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Layer 1: Domain/parameter validation                                   │
//! │  ──────────────────────────────────────                                 │
//! │  Every factory (generate_parameters, new_curve, generate_rsa_key)       │
//! │  validates its own output before returning it; nothing half-valid       │
//! │  ever reaches a caller.                                                  │
//! │                                                                         │
//! │  Layer 2: Public-key validation on receipt                              │
//! │  ─────────────────────────────────────────                              │
//! │  Every `validate_pub_key` defends against a specific attack: DH against  │
//! │  small-subgroup confinement, EC against invalid-curve/invalid-point      │
//! │  attacks. This check is mandatory, not optional hardening.              │
//! │                                                                         │
//! │  Layer 3: Session-key derivation always hashes                          │
//! │  ───────────────────────────────────────────                            │
//! │  No raw shared secret (DH `g^xy mod p`, ECDH `d*Q_peer`) is ever used    │
//! │  directly as key material; it is always passed through a [`hash::Hasher`]│
//! │  first, destroying algebraic structure that could otherwise leak bits.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Scope
//!
//! This crate is the cryptographic core only: arithmetic, key generation,
//! session derivation, and signatures. It emits no PEM/DER, no wire
//! framing, and no CLI; those are the responsibility of thin wrapper
//! layers built on top of the public functions re-exported here.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod csprng;
pub mod dh;
pub mod ec;
pub mod error;
pub mod hash;
pub mod kernel;
pub mod rsa;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use dh::{DHKey, DHParameters};
pub use ec::{ECKey, EcContext};
pub use error::{Error, Result};
pub use hash::{Hasher, Sha256Hasher};
pub use rsa::RSAKey;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of this crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
