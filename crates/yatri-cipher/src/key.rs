//! Turning a configured secret into a 256-bit key.

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Byte appended to short secrets by [`KeyDerivation::Legacy`].
pub const FILLER: u8 = b'0';

// OWASP baseline for Argon2id.
const ARGON2_MEMORY_KIB: u32 = 19 * 1024;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

/// How the configured secret becomes the cipher key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyDerivation {
  /// Right-pad with [`FILLER`] or truncate the secret's bytes to
  /// [`KEY_LEN`]. Not a KDF: no salt, no work factor. Kept because records
  /// already written under this scheme only decrypt with it.
  #[default]
  Legacy,
  /// Argon2id over the secret with a deployment-wide salt (at least 8
  /// bytes). Switching to this makes existing legacy records unreadable.
  Argon2id { salt: String },
}

impl KeyDerivation {
  pub fn derive(&self, secret: &str) -> Result<[u8; KEY_LEN]> {
    match self {
      KeyDerivation::Legacy => Ok(legacy_key(secret)),
      KeyDerivation::Argon2id { salt } => argon2id_key(secret, salt),
    }
  }
}

fn legacy_key(secret: &str) -> [u8; KEY_LEN] {
  let mut key = [FILLER; KEY_LEN];
  let bytes = secret.as_bytes();
  let n = bytes.len().min(KEY_LEN);
  key[..n].copy_from_slice(&bytes[..n]);
  key
}

fn argon2id_key(secret: &str, salt: &str) -> Result<[u8; KEY_LEN]> {
  let params = Params::new(
    ARGON2_MEMORY_KIB,
    ARGON2_ITERATIONS,
    ARGON2_PARALLELISM,
    Some(KEY_LEN),
  )
  .map_err(|e| Error::KeyDerivation(e.to_string()))?;

  let mut key = [0u8; KEY_LEN];
  Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    .hash_password_into(secret.as_bytes(), salt.as_bytes(), &mut key)
    .map_err(|e| Error::KeyDerivation(e.to_string()))?;
  Ok(key)
}
