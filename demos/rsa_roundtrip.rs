//! # RSA Key Encapsulation and Signature Demo
//!
//! Generates an RSA keypair, walks through key encapsulation (sender
//! encrypts a fresh session key under the recipient's modulus, recipient
//! recovers the same key), and a full-domain-hash sign/verify round trip.
//!
//! Runs at a reduced modulus size so it completes quickly; the same calls
//! at 2048 bits are exercised by the `#[ignore]`d tests in
//! `src/rsa/mod.rs`.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example rsa_roundtrip
//! ```

use keystone_core::rsa::{decrypt_key, encrypt_key, generate_rsa_key, sign, verify};

fn main() {
    println!("=== Keystone Core: RSA Key Encapsulation + Signing ===\n");

    println!("Generating a 256-bit RSA key (demo size; production uses 2048+)...");
    let key = generate_rsa_key(256).expect("key generation");
    println!("  Modulus bit length: {}", key.modulus().bits());
    println!();

    println!("Alice encapsulates a session key under Bob's modulus...");
    let (k_alice, ciphertext) = encrypt_key(key.modulus()).expect("encrypt");
    println!("  Encapsulated session key: {}", hex::encode(&k_alice));

    println!("Bob decapsulates with his private key...");
    let k_bob = decrypt_key(&key, &ciphertext).expect("decrypt");
    println!("  Recovered session key:    {}", hex::encode(&k_bob));
    assert_eq!(k_alice, k_bob);
    println!("Session keys match.\n");

    let message = b"Sign and encrypt me!";
    println!("Alice signs a message with RSA-FDH...");
    let signature = sign(&key, message).expect("sign");
    let ok = verify(key.modulus(), message, &signature).expect("verify");
    println!("  Signature verifies: {ok}");
    assert!(ok);
}
