//! AES-256-GCM field encryption and keyed lookup tokens.

use std::fmt;

use aes_gcm::{
  AesGcm,
  aead::{AeadInPlace, KeyInit, consts::U16, generic_array::GenericArray},
  aes::Aes256,
};
use hmac::{Hmac, Mac};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::{
  CipherConfig, EncryptedBlob, Error, IV_LEN, KEY_LEN, KeyDerivation, Result,
  TAG_LEN,
};

/// AES-256-GCM with a 16-byte IV; the nonce is run through GHASH as GCM
/// specifies for non-96-bit IVs.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

type HmacSha256 = Hmac<Sha256>;

/// Domain string mixed into the lookup key so it never equals the
/// encryption key.
const LOOKUP_KEY_DOMAIN: &[u8] = b"yatri/lookup-token/v1";

/// Which member field a lookup token is computed for. Identical plaintext in
/// different fields yields different tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiiField {
  IdentityNumber,
  Phone,
}

impl PiiField {
  fn domain(self) -> &'static [u8] {
    match self {
      PiiField::IdentityNumber => b"identity_number",
      PiiField::Phone => b"phone",
    }
  }
}

/// Encrypts, decrypts, and tokenises PII with one process-wide key.
///
/// Immutable after construction; share it behind an `Arc` and call it from
/// any number of tasks.
#[derive(Clone)]
pub struct PiiCipher {
  aead:   Aes256Gcm16,
  lookup: HmacSha256,
}

impl fmt::Debug for PiiCipher {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PiiCipher").finish_non_exhaustive()
  }
}

impl PiiCipher {
  pub fn new(key: [u8; KEY_LEN]) -> Result<Self> {
    let aead = Aes256Gcm16::new_from_slice(&key).map_err(|_| Error::Encryption)?;

    let lookup_key = Sha256::new()
      .chain_update(LOOKUP_KEY_DOMAIN)
      .chain_update(key)
      .finalize();
    let lookup = <HmacSha256 as Mac>::new_from_slice(&lookup_key)
      .map_err(|_| Error::Encryption)?;

    Ok(Self { aead, lookup })
  }

  /// Derive the key from `secret` and build a cipher.
  pub fn from_secret(secret: &str, derivation: &KeyDerivation) -> Result<Self> {
    Self::new(derivation.derive(secret)?)
  }

  pub fn from_config(config: &CipherConfig) -> Result<Self> {
    Self::from_secret(config.secret(), &config.key_derivation)
  }

  /// Encrypt `plaintext` into an `iv:ciphertext:tag` string.
  ///
  /// An empty input yields an empty output, not an encryption of "". Each
  /// call draws a fresh IV, so repeated calls never return the same blob.
  pub fn encrypt(&self, plaintext: &str) -> Result<String> {
    if plaintext.is_empty() {
      return Ok(String::new());
    }

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = self
      .aead
      .encrypt_in_place_detached(GenericArray::from_slice(&iv), b"", &mut buffer)
      .map_err(|_| Error::Encryption)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok(EncryptedBlob { iv, ciphertext: buffer, tag: tag_bytes }.to_string())
  }

  /// Decrypt a blob produced by [`PiiCipher::encrypt`].
  ///
  /// Malformed input, a tag mismatch, or a wrong key all return
  /// [`Error::Decryption`]; no partial plaintext is ever produced.
  pub fn decrypt(&self, blob: &str) -> Result<String> {
    let blob: EncryptedBlob = blob.parse()?;
    let mut buffer = blob.ciphertext;
    self
      .aead
      .decrypt_in_place_detached(
        GenericArray::from_slice(&blob.iv),
        b"",
        &mut buffer,
        GenericArray::from_slice(&blob.tag),
      )
      .map_err(|_| Error::Decryption)?;
    String::from_utf8(buffer).map_err(|_| Error::Decryption)
  }

  /// `None` for an absent or empty value, otherwise [`PiiCipher::encrypt`].
  pub fn encrypt_optional(&self, plaintext: Option<&str>) -> Result<Option<String>> {
    match plaintext {
      Some(p) if !p.is_empty() => self.encrypt(p).map(Some),
      _ => Ok(None),
    }
  }

  /// `None` for an absent or empty blob, otherwise [`PiiCipher::decrypt`].
  pub fn decrypt_optional(&self, blob: Option<&str>) -> Result<Option<String>> {
    match blob {
      Some(b) if !b.is_empty() => self.decrypt(b).map(Some),
      _ => Ok(None),
    }
  }

  /// Deterministic keyed token for equality lookups on `field`.
  ///
  /// Store it next to the encrypted blob and query by it; the same
  /// plaintext always produces the same token under the same key.
  pub fn lookup_token(&self, field: PiiField, plaintext: &str) -> String {
    let mut mac = self.lookup.clone();
    mac.update(field.domain());
    mac.update(&[0]);
    mac.update(plaintext.as_bytes());
    hex::encode(mac.finalize().into_bytes())
  }
}
