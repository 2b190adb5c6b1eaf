// Primality Testing and Prime Generation
// Miller-Rabin probabilistic test and a bounded random-candidate search

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use super::arith::mod_pow;
use crate::error::RsaError;

/// Default Miller-Rabin round count. Each round has at most a 1/4 chance of
/// missing a composite, so 20 rounds bound the error below 4^-20.
pub const MILLER_RABIN_ROUNDS: u32 = 20;

/// Small primes used to discard obvious composites before running the
/// expensive Miller-Rabin trials. Rejection only; membership in this table
/// is never taken as proof of primality.
const SMALL_PRIMES: [u32; 46] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
    73, 79, 83, 89, 97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151,
    157, 163, 167, 173, 179, 181, 191, 193, 197, 199, 211,
];

/// Miller-Rabin primality test with `rounds` independent random-base trials.
///
/// Returns false for n <= 1 and even n > 2, true immediately for 2 and 3.
/// A prime never fails; a composite passes all trials with probability at
/// most 4^-rounds.
pub fn is_probably_prime<R: Rng + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let two = BigUint::from(2u8);
    let three = BigUint::from(3u8);

    if n <= &BigUint::one() {
        return false;
    }
    if n == &two || n == &three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as 2^r * d with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }

    // Witness loop: a single witness proves n composite
    let n_minus_two = n - 2u8;
    for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_two);
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        let mut witnessed = true;
        for _ in 1..r {
            x = (&x * &x) % n;
            if x == n_minus_one {
                witnessed = false;
                break;
            }
        }

        if witnessed {
            return false;
        }
    }

    true
}

/// Divisibility pre-check against the small-prime table.
/// Returns true when n is a multiple of a table entry larger than itself.
fn has_small_factor(n: &BigUint) -> bool {
    SMALL_PRIMES.iter().any(|&p| {
        let p = BigUint::from(p);
        n > &p && (n % p).is_zero()
    })
}

/// Random prime search over candidates of an exact bit length.
///
/// Candidates are sampled with the top and bottom bit forced to 1, so every
/// candidate is odd and exactly `bits` long. The search is unbounded by
/// default; `with_max_attempts` caps it for callers that need deterministic
/// latency, trading a possible `PrimeSearchExhausted` error for a hang-free
/// worst case.
#[derive(Debug, Clone)]
pub struct PrimeGenerator {
    bits: u64,
    rounds: u32,
    max_attempts: Option<usize>,
}

impl PrimeGenerator {
    pub fn new(bits: u64) -> Self {
        debug_assert!(bits >= 2, "candidate sampling forces two bits");
        Self {
            bits,
            rounds: MILLER_RABIN_ROUNDS,
            max_attempts: None,
        }
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sample one odd candidate with the exact target bit length.
    fn candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint {
        let mut c = rng.gen_biguint(self.bits);
        c.set_bit(self.bits - 1, true);
        c.set_bit(0, true);
        c
    }

    /// Search candidates until one passes Miller-Rabin.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BigUint, RsaError> {
        let mut attempts = 0usize;
        loop {
            if let Some(cap) = self.max_attempts {
                if attempts >= cap {
                    return Err(RsaError::PrimeSearchExhausted {
                        bits: self.bits,
                        attempts,
                    });
                }
            }
            attempts += 1;

            let c = self.candidate(rng);
            if has_small_factor(&c) {
                continue;
            }
            if is_probably_prime(&c, self.rounds, rng) {
                log::debug!("found {}-bit prime after {} candidates", self.bits, attempts);
                return Ok(c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    fn check(n: u64) -> bool {
        is_probably_prime(&BigUint::from(n), MILLER_RABIN_ROUNDS, &mut rng())
    }

    #[test]
    fn test_known_primes() {
        for p in [2u64, 3, 5, 7, 11, 13, 97, 7919] {
            assert!(check(p), "{} should be prime", p);
        }
    }

    #[test]
    fn test_known_composites() {
        // 561 = 3 * 11 * 17 is a Carmichael number
        for c in [4u64, 9, 15, 100, 561] {
            assert!(!check(c), "{} should be composite", c);
        }
    }

    #[test]
    fn test_rejects_zero_one_and_evens() {
        assert!(!check(0));
        assert!(!check(1));
        for even in [4u64, 100, 65536] {
            assert!(!check(even));
        }
    }

    #[test]
    fn test_generated_prime_shape() {
        let mut rng = rng();
        let prime = PrimeGenerator::new(64).generate(&mut rng).unwrap();
        assert_eq!(prime.bits(), 64);
        assert!(prime.is_odd());
    }

    #[test]
    fn test_generation_is_deterministic_under_seeded_rng() {
        let gen = PrimeGenerator::new(96);
        let a = gen.generate(&mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        let b = gen.generate(&mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_attempt_cap_exhaustion() {
        let mut rng = rng();
        let err = PrimeGenerator::new(256)
            .with_max_attempts(0)
            .generate(&mut rng)
            .unwrap_err();
        assert!(matches!(err, RsaError::PrimeSearchExhausted { attempts: 0, .. }));
    }

    #[test]
    fn test_small_factor_precheck_never_rejects_table_primes() {
        for &p in SMALL_PRIMES.iter() {
            assert!(!has_small_factor(&BigUint::from(p)));
        }
        assert!(has_small_factor(&BigUint::from(3u32 * 211)));
    }
}
