//! Unkeyed one-way digest.

use sha2::{Digest, Sha256};

/// SHA-256 of `plaintext`, as 64 lowercase hex characters.
///
/// Unkeyed, so low-entropy inputs such as phone numbers can be brute-forced
/// from the digest; use [`crate::PiiCipher::lookup_token`] for stored
/// equality lookups.
pub fn hash(plaintext: &str) -> String {
  hex::encode(Sha256::digest(plaintext.as_bytes()))
}
