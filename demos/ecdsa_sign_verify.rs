//! # ECDH + ECDSA Demo
//!
//! Validates the secp256k1 domain, derives an ECDH session key between
//! two keypairs, and signs/verifies a message with ECDSA.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example ecdsa_sign_verify
//! ```

use keystone_core::ec::{curves, generate_keypair, generate_session_key, new_curve_default, sign, verify};

fn main() {
    println!("=== Keystone Core: ECDH + ECDSA over secp256k1 ===\n");

    println!("Validating curve domain parameters...");
    let ctx = new_curve_default(curves::secp256k1()).expect("curve validation");
    println!("  secp256k1 validated (prime field, correct order, MOV/FR clean).\n");

    println!("Alice and Bob each generate a keypair...");
    let alice = generate_keypair(&ctx).expect("alice keygen");
    let bob = generate_keypair(&ctx).expect("bob keygen");

    println!("Deriving the shared ECDH session key...");
    let k_alice = generate_session_key(bob.public_key(), &alice, &ctx).expect("alice session key");
    let k_bob = generate_session_key(alice.public_key(), &bob, &ctx).expect("bob session key");
    println!("  Alice's session key: {}", hex::encode(&k_alice));
    println!("  Bob's session key:   {}", hex::encode(&k_bob));
    assert_eq!(k_alice, k_bob);
    println!("Session keys match.\n");

    let message = b"Sign and encrypt me!";
    println!("Alice signs a message with ECDSA...");
    let signature = sign(&alice, message, &ctx).expect("sign");
    let ok = verify(alice.public_key(), message, &signature, &ctx).expect("verify");
    println!("  Signature verifies: {ok}");
    assert!(ok);
}
