//! Lookup key derivation.
//!
//! Keys are the SHA-256 of the selected field values concatenated with no
//! separator, hex encoded. Queries rebuild the same key from a country name
//! (and a year for composite keys), so both sides must concatenate alike.

use sha2::{Digest, Sha256};

/// Hex-encoded length of every key.
pub const KEY_LEN: usize = 64;

/// Hash the concatenation of `parts` into a printable lookup key.
#[must_use]
pub fn hash_key<S: AsRef<str>>(parts: &[S]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}
