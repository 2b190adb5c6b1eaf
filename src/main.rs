// Demonstration binary
// Generates a key pair, signs a fixed message and verifies it both ways

use anyhow::Context;
use manual_rsa::rsa::{generate_keypair, sign, verify};

const PRIME_BITS: u64 = 512;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Generating RSA key pair from two {}-bit primes...", PRIME_BITS);
    let keypair = generate_keypair(PRIME_BITS).context("key generation failed")?;
    println!("Modulus: {} bits", keypair.bit_length());

    let message = "Secure communication using manual RSA!";
    let signature = sign(message.as_bytes(), &keypair.private_key);
    println!("Signature: {}", hex::encode(signature.to_bytes_be()));

    let valid = verify(message.as_bytes(), &signature, &keypair.public_key);
    println!(
        "{}",
        if valid {
            "Valid signature (original message): PASS"
        } else {
            "Valid signature (original message): FAIL"
        }
    );

    let tampered = "Hello";
    let still_valid = verify(tampered.as_bytes(), &signature, &keypair.public_key);
    println!(
        "{}",
        if still_valid {
            "Rejected signature (altered message): FAIL"
        } else {
            "Rejected signature (altered message): PASS"
        }
    );

    if !valid || still_valid {
        anyhow::bail!("signature demonstration failed");
    }
    Ok(())
}
