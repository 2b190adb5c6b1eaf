// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod arith;
pub mod digest;
pub mod keygen;
pub mod prime;
pub mod sign;

pub use digest::digest;
pub use keygen::{generate_keypair, generate_keypair_with_rng, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use prime::{is_probably_prime, PrimeGenerator, MILLER_RABIN_ROUNDS};
pub use sign::{sign, verify};
