//! Stable digests for pseudonymous folder names

use sha2::{Digest, Sha256};

/// First 12 hex characters of the SHA-256 digest of `name`.
pub fn short_digest(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::short_digest;

    #[test]
    fn digest_is_stable_and_short() {
        assert_eq!(short_digest("Documents"), short_digest("Documents"));
        assert_ne!(short_digest("Documents"), short_digest("documents"));
        assert_eq!(short_digest("").as_str(), "e3b0c44298fc");
    }
}
