//! Error type for `yatri-cipher`.
//!
//! Messages are deliberately opaque: no variant carries plaintext, key
//! material, or the underlying AEAD error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("encryption failed")]
  Encryption,

  /// Malformed blob, tag mismatch, or wrong key. Outside of tampering this
  /// means the configured key changed after the value was written.
  #[error("decryption failed")]
  Decryption,

  #[error("key derivation failed: {0}")]
  KeyDerivation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
