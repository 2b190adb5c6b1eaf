// manual-rsa
// Textbook RSA: key generation, digest signing and verification over num-bigint

pub mod error;
pub mod rsa;

pub use error::RsaError;
pub use rsa::{generate_keypair, generate_keypair_with_rng, sign, verify, RsaKeyPair};
