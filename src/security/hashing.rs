//! SHA-256 client identity hashing

use sha2::{Digest, Sha256};

/// Length of a like-token in hex characters
pub const TOKEN_LEN: usize = 64;

/// Turns client network identifiers into opaque like-tokens.
///
/// Tokens are deterministic for a given pepper, so the same client always
/// maps to the same token, but the address cannot be read back out of it.
#[derive(Debug, Clone, Default)]
pub struct IpHasher {
    pepper: Vec<u8>,
}

impl IpHasher {
    /// Create new hasher with pepper (empty pepper hashes the bare identifier)
    pub fn new(pepper: &[u8]) -> Self {
        Self {
            pepper: pepper.to_vec(),
        }
    }

    /// Hash an identifier into a lowercase hex like-token
    pub fn hash(&self, identifier: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(identifier.as_bytes());
        hasher.update(&self.pepper);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = IpHasher::default();

        let a = hasher.hash("203.0.113.7");
        let b = hasher.hash("203.0.113.7");

        assert_eq!(a, b);
        assert_eq!(a.len(), TOKEN_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_digest() {
        // sha256("127.0.0.1")
        let hasher = IpHasher::default();
        assert_eq!(
            hasher.hash("127.0.0.1"),
            "12ca17b49af2289436f303e0166030a21e525d266e209267433801a8fd4071a0"
        );
    }

    #[test]
    fn test_different_inputs() {
        let hasher = IpHasher::default();
        assert_ne!(hasher.hash("10.0.0.1"), hasher.hash("10.0.0.2"));
        assert_eq!(hasher.hash("").len(), TOKEN_LEN);
    }

    #[test]
    fn test_pepper_changes_token() {
        let plain = IpHasher::default();
        let peppered = IpHasher::new(b"deployment-secret");

        assert_ne!(plain.hash("10.0.0.1"), peppered.hash("10.0.0.1"));
        assert_eq!(peppered.hash("10.0.0.1"), peppered.hash("10.0.0.1"));
    }
}
