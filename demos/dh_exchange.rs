//! # Diffie-Hellman Key Exchange Demo
//!
//! Demonstrates parameter generation, keypair generation, and session-key
//! agreement between two parties.
//!
//! Uses a small hand-picked parameter set rather than `generate_parameters`
//! so the demo runs instantly; the full generation path is the one
//! `keystone_core::dh::generate_parameters` exercises (and is covered by
//! `#[ignore]`d tests in `src/dh/mod.rs`).
//!
//! ## Run
//!
//! ```bash
//! cargo run --example dh_exchange
//! ```

use keystone_core::dh::{generate_keypair, generate_session_key, DHParameters};
use num_bigint::BigUint;

fn main() {
    println!("=== Keystone Core: Diffie-Hellman Exchange ===\n");

    // q = 11 (prime), p = 23 = 2*11 + 1, g = 9 has order 11 mod 23.
    let params = DHParameters {
        q: BigUint::from(11u32),
        p: BigUint::from(23u32),
        g: BigUint::from(9u32),
    };
    println!("Parameters: q={}, p={}, g={}\n", params.q, params.p, params.g);

    println!("Alice and Bob each generate a keypair...");
    let alice = generate_keypair(&params).expect("alice keygen");
    let bob = generate_keypair(&params).expect("bob keygen");
    println!("  Alice's public key: {}", alice.public_key());
    println!("  Bob's public key:   {}", bob.public_key());
    println!();

    println!("Each derives the session key from the other's public key...");
    let k_alice = generate_session_key(bob.public_key(), &alice).expect("alice session key");
    let k_bob = generate_session_key(alice.public_key(), &bob).expect("bob session key");

    println!("  Alice's session key: {}", hex::encode(&k_alice));
    println!("  Bob's session key:   {}", hex::encode(&k_bob));
    assert_eq!(k_alice, k_bob);
    println!("\nSession keys match.");
}
