// Message Digest
// SHA-256 adapter turning a message into the integer that gets signed

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

/// Width of the digest output in bits.
pub const DIGEST_BITS: u64 = 256;

/// Hash a message with SHA-256 and interpret the output as a big-endian
/// integer. The signing protocol treats this as a black box; swapping the
/// hash changes signature values but not the protocol.
pub fn digest(message: &[u8]) -> BigUint {
    let hash = Sha256::digest(message);
    BigUint::from_bytes_be(&hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let a = digest(b"Secure communication using manual RSA!");
        let b = digest(b"Secure communication using manual RSA!");
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_distinguishes_messages() {
        assert_ne!(digest(b"Hello"), digest(b"hello"));
        assert_ne!(digest(b""), digest(b"\0"));
    }

    #[test]
    fn test_digest_fits_width() {
        assert!(digest(b"anything at all").bits() <= DIGEST_BITS);
    }

    #[test]
    fn test_digest_known_vector() {
        // SHA-256 of the empty string
        let expected = hex::decode(
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        )
        .unwrap();
        assert_eq!(digest(b""), BigUint::from_bytes_be(&expected));
    }
}
