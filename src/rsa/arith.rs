// Modular Arithmetic Toolkit
// GCD, extended Euclid, modular inverse and modular exponentiation on BigUint

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Greatest common divisor; `gcd(a, 0) = a`.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Extended Euclidean Algorithm over signed integers.
/// Returns (g, x, y) such that a*x + b*y = g = gcd(a, b)
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns the unique x in [0, m) with a*x ≡ 1 (mod m), or None when
/// gcd(a, m) != 1 and no inverse exists. m = 1 yields 0.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_one() {
        return Some(BigUint::zero());
    }

    let m_signed = BigInt::from(m.clone());
    let (g, x, _) = extended_gcd(&BigInt::from(a.clone()), &m_signed);
    if !g.is_one() {
        return None;
    }

    // Normalize the Bezout coefficient into [0, m)
    let x = ((x % &m_signed) + &m_signed) % &m_signed;
    x.to_biguint()
}

/// Modular exponentiation: base^exp mod modulus
/// Right-to-left square-and-multiply; exp = 0 gives 1 mod modulus,
/// with the convention 1 mod 1 = 0.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}
