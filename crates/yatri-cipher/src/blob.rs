//! The `iv:ciphertext:tag` storage format.

use std::{fmt, str::FromStr};

use crate::Error;

/// AES-GCM initialization vector length used by this format.
pub const IV_LEN: usize = 16;

/// AES-GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// A parsed encrypted value.
///
/// The string form is three lowercase hex fields joined by `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
  pub iv:         [u8; IV_LEN],
  pub ciphertext: Vec<u8>,
  pub tag:        [u8; TAG_LEN],
}

impl fmt::Display for EncryptedBlob {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}:{}:{}",
      hex::encode(self.iv),
      hex::encode(&self.ciphertext),
      hex::encode(self.tag)
    )
  }
}

impl FromStr for EncryptedBlob {
  type Err = Error;

  /// Any structural problem is reported as [`Error::Decryption`].
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let parts: Vec<&str> = s.split(':').collect();
    let [iv, ciphertext, tag] = parts.as_slice() else {
      return Err(Error::Decryption);
    };

    let mut iv_bytes = [0u8; IV_LEN];
    hex::decode_to_slice(iv, &mut iv_bytes).map_err(|_| Error::Decryption)?;
    let ciphertext = hex::decode(ciphertext).map_err(|_| Error::Decryption)?;
    let mut tag_bytes = [0u8; TAG_LEN];
    hex::decode_to_slice(tag, &mut tag_bytes).map_err(|_| Error::Decryption)?;

    Ok(Self { iv: iv_bytes, ciphertext, tag: tag_bytes })
  }
}
