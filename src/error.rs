// Crate Error Type
// Failures surfaced by key generation; signing and verification never fail

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RsaError {
    /// Requested prime size leaves no room for the forced top/bottom bits.
    #[error("bit length must be at least {min} bits, got {got}")]
    BitLengthTooSmall { min: u64, got: u64 },

    /// The bounded candidate search ran out of attempts before finding a
    /// prime. Only possible when a maximum attempt count was configured.
    #[error("no {bits}-bit prime found within {attempts} candidates")]
    PrimeSearchExhausted { bits: u64, attempts: usize },

    /// The selected public exponent has no inverse modulo the totient.
    /// The exponent-selection loop guarantees coprimality, so hitting this
    /// indicates a broken random source.
    #[error("public exponent is not invertible modulo the totient")]
    NoModularInverse,
}
