#![deny(unsafe_code)]

use sha2::Digest;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// First 12 hex characters of the SHA-256, for log lines and tables.
pub fn short_fingerprint(bytes: &[u8]) -> String {
    let mut digest = sha256_hex(bytes);
    digest.truncate(12);
    digest
}
