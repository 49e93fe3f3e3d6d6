//! Hashing helpers

use sha2::{Digest, Sha256};

/// SHA-256 digest of `data` as lowercase hex
///
/// Used to fingerprint migration SQL in `schema_migrations`.
pub fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}
