// RSA Signing and Verification
// Raises the message digest to the private/public exponent modulo n

use num_bigint::BigUint;

use super::arith::mod_pow;
use super::digest::digest;
use super::keygen::{RsaPrivateKey, RsaPublicKey};

/// Sign a message: s = digest(message)^d mod n.
///
/// The digest must be smaller than the modulus for the signature to carry
/// the full hash; with 256-bit SHA-256 digests any modulus above 256 bits
/// satisfies this. Oversized digests are reduced modulo n by the
/// exponentiation itself, a textbook simplification this crate does not
/// correct.
pub fn sign(message: &[u8], private_key: &RsaPrivateKey) -> BigUint {
    let h = digest(message);
    mod_pow(&h, &private_key.d, &private_key.n)
}

/// Verify a signature: recompute the digest and compare it against
/// signature^e mod n. A false result is a normal outcome (tampered message,
/// wrong key, or corrupted signature), never an error.
pub fn verify(message: &[u8], signature: &BigUint, public_key: &RsaPublicKey) -> bool {
    let h = digest(message);
    let recovered = mod_pow(signature, &public_key.e, &public_key.n);
    h == recovered
}
