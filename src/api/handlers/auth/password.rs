//! Password hashing and verification.

pub use bcrypt::BcryptError;

/// Hash a plaintext password with a per-password salt.
///
/// Deliberately slow (adaptive cost factor) to resist offline brute force.
///
/// # Errors
/// Fails only on catastrophic internal error; callers treat that as fatal to
/// the whole operation.
pub fn hash(plaintext: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
}

/// Verify a plaintext password against a stored digest.
///
/// A mismatch is `Ok(false)`, not an error; `Err` means the stored digest
/// itself is structurally malformed.
pub fn verify(plaintext: &str, digest: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plaintext, digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let digest = bcrypt::hash("secret1", TEST_COST).unwrap();

        assert!(verify("secret1", &digest).unwrap());
        assert!(!verify("secret2", &digest).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = bcrypt::hash("secret1", TEST_COST).unwrap();
        let second = bcrypt::hash("secret1", TEST_COST).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        assert!(verify("secret1", "not-a-bcrypt-digest").is_err());
    }
}
