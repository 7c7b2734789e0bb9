//! # Arithmetic Kernel
//!
//! The shared foundation every other module builds on: arbitrary-precision
//! unsigned integers (via `num-bigint`'s `BigUint`), modular exponentiation,
//! the extended Euclidean algorithm, CRT recomposition, and primality
//! testing.
//!
//! Dependency order within the kernel: [`euclid`] has no dependents inside
//! this module; [`arith`] depends on [`euclid`] for modular inverse;
//! [`primes`] depends on [`arith`] for `fast_mod_exp` and on
//! [`crate::csprng`] for witness/candidate sampling.

pub mod arith;
pub mod euclid;
pub mod primes;

pub use arith::{
    digest_int, fast_mod_exp, fast_mod_exp_crt, from_bytes_be, from_bytes_le, from_crt,
    to_bytes_be, to_bytes_le, to_crt,
};
pub use euclid::{gcd, gcdx, inverse, lcm};
pub use primes::{fermat_factor, fermat_is_prime, generate_prime, is_prime};
