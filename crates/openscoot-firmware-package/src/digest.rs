//! MD5 digest helpers
//!
//! MD5 is the integrity check mandated by the package wire format; it is not
//! a security boundary. Digests are computed over the exact payload bytes
//! with no normalization.

use md5::{Digest, Md5};

/// Compute the lowercase 32-character hex MD5 of `data`.
pub fn compute_md5(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compare two hex digest strings case-insensitively.
pub fn digests_match(declared: &str, computed: &str) -> bool {
    declared.eq_ignore_ascii_case(computed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        // RFC 1321 test vector
        assert_eq!(compute_md5(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(compute_md5(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let digest = compute_md5(b"firmware");
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(digests_match(
            "900150983CD24FB0D6963F7D28E17F72",
            "900150983cd24fb0d6963f7d28e17f72"
        ));
        assert!(!digests_match(
            "900150983cd24fb0d6963f7d28e17f72",
            "900150983cd24fb0d6963f7d28e17f73"
        ));
    }
}
