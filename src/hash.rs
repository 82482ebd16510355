//! BLAKE3 content fingerprints used to detect identical reinstalls

use blake3::Hasher;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate the BLAKE3 hash of some content
pub fn hash_content(content: impl AsRef<[u8]>) -> String {
    let mut hasher = Hasher::new();
    hasher.update(content.as_ref());
    format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex())
}

/// Check if two contents hash to the same digest
pub fn is_same_content(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
    hash_content(a) == hash_content(b)
}
