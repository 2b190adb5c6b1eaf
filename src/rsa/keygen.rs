// RSA Key Generation
// Composes two random primes into an immutable RSA key pair

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::{thread_rng, Rng};

use super::arith::{gcd, mod_inverse};
use super::prime::PrimeGenerator;
use crate::error::RsaError;

/// Conventional public exponent, tried before falling back to random search.
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Smallest supported prime size. Candidate sampling forces two bits and
/// Miller-Rabin needs candidates >= 5, so tiny sizes are rejected up front.
const MIN_PRIME_BITS: u64 = 16;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPublicKey {
    pub n: BigUint, // Modulus
    pub e: BigUint, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq)]
pub struct RsaPrivateKey {
    pub n: BigUint, // Modulus (same as public)
    pub d: BigUint, // Private exponent
    pub p: BigUint, // First prime factor
    pub q: BigUint, // Second prime factor
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub prime_bits: u64,
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaPrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaKeyPair {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

/// Generate an RSA key pair from two fresh primes of `prime_bits` bits each,
/// drawing all randomness from `rng`.
///
/// The public exponent starts at 65537 and falls back to random sampling in
/// (2, phi) when 65537 shares a factor with the totient.
pub fn generate_keypair_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    prime_bits: u64,
) -> Result<RsaKeyPair, RsaError> {
    if prime_bits < MIN_PRIME_BITS {
        return Err(RsaError::BitLengthTooSmall {
            min: MIN_PRIME_BITS,
            got: prime_bits,
        });
    }

    let generator = PrimeGenerator::new(prime_bits);

    // Step 1: Generate two distinct primes p and q
    let p = generator.generate(rng)?;
    let mut q = generator.generate(rng)?;
    while q == p {
        // Collision is astronomically unlikely at real sizes, but cheap to rule out
        q = generator.generate(rng)?;
    }

    // Step 2: Compute n = p * q and phi(n) = (p-1)(q-1)
    let n = &p * &q;
    let phi = (&p - 1u8) * (&q - 1u8);

    // Step 3: Select a public exponent coprime to phi
    let one = BigUint::one();
    let three = BigUint::from(3u8);
    let mut e = BigUint::from(PUBLIC_EXPONENT);
    while gcd(&e, &phi) != one {
        log::warn!("e={} shares a factor with phi, resampling exponent", e);
        e = rng.gen_biguint_range(&three, &phi);
    }

    // Step 4: Compute d = e^(-1) mod phi; the loop above guarantees the
    // inverse exists
    let d = mod_inverse(&e, &phi).ok_or(RsaError::NoModularInverse)?;
    debug_assert_eq!((&e * &d) % &phi, one);

    log::info!("generated {}-bit RSA modulus", n.bits());

    Ok(RsaKeyPair {
        public_key: RsaPublicKey { n: n.clone(), e },
        private_key: RsaPrivateKey { n, d, p, q },
        prime_bits,
    })
}

/// Generate an RSA key pair using the thread-local random source.
pub fn generate_keypair(prime_bits: u64) -> Result<RsaKeyPair, RsaError> {
    generate_keypair_with_rng(&mut thread_rng(), prime_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::prime::is_probably_prime;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_keypair(bits: u64) -> RsaKeyPair {
        let mut rng = ChaCha20Rng::seed_from_u64(1234);
        generate_keypair_with_rng(&mut rng, bits).unwrap()
    }

    #[test]
    fn test_key_generation() {
        let keypair = test_keypair(128);
        assert_eq!(keypair.prime_bits, 128);
        // n carries roughly the combined bit length of p and q
        assert!(keypair.bit_length() == 255 || keypair.bit_length() == 256);
    }

    #[test]
    fn test_primes_are_distinct_and_prime() {
        let keypair = test_keypair(128);
        let sk = &keypair.private_key;
        assert_ne!(sk.p, sk.q);

        let mut rng = ChaCha20Rng::seed_from_u64(99);
        assert!(is_probably_prime(&sk.p, 40, &mut rng));
        assert!(is_probably_prime(&sk.q, 40, &mut rng));
    }

    #[test]
    fn test_key_invariants() {
        let keypair = test_keypair(128);
        let pk = &keypair.public_key;
        let sk = &keypair.private_key;

        // n = p * q
        assert_eq!(sk.n, &sk.p * &sk.q);

        // e * d ≡ 1 (mod phi)
        let phi = (&sk.p - 1u8) * (&sk.q - 1u8);
        assert_eq!((&pk.e * &sk.d) % &phi, BigUint::one());
        assert!(pk.e < phi);
    }

    #[test]
    fn test_rejects_tiny_bit_length() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = generate_keypair_with_rng(&mut rng, 8).unwrap_err();
        assert!(matches!(err, RsaError::BitLengthTooSmall { got: 8, .. }));
    }
}
