//! Cipher configuration, deserialised by the server's config layer.

use std::fmt;

use serde::Deserialize;

use crate::KeyDerivation;

/// Secret used when none is configured. Development only.
pub const DEV_DEFAULT_SECRET: &str = "yatri-dev-insecure-default-secret";

#[derive(Clone, Default, Deserialize)]
pub struct CipherConfig {
  /// Key material. Read once at startup; `None` falls back to
  /// [`DEV_DEFAULT_SECRET`].
  pub encryption_key: Option<String>,
  #[serde(default)]
  pub key_derivation: KeyDerivation,
}

impl CipherConfig {
  /// The configured secret, or the development default with a warning.
  pub fn secret(&self) -> &str {
    match self.encryption_key.as_deref() {
      Some(key) if !key.is_empty() => key,
      _ => {
        tracing::warn!(
          "encryption_key is not set; using the insecure development default"
        );
        DEV_DEFAULT_SECRET
      }
    }
  }
}

impl fmt::Debug for CipherConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CipherConfig")
      .field("encryption_key", &self.encryption_key.as_ref().map(|_| "<redacted>"))
      .field("key_derivation", &self.key_derivation)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::PiiCipher;

  #[test]
  fn missing_key_falls_back_to_default() {
    assert_eq!(CipherConfig::default().secret(), DEV_DEFAULT_SECRET);
    let empty = CipherConfig { encryption_key: Some(String::new()), ..Default::default() };
    assert_eq!(empty.secret(), DEV_DEFAULT_SECRET);
  }

  #[test]
  fn configured_key_is_used() {
    let config = CipherConfig {
      encryption_key: Some("configured".into()),
      ..Default::default()
    };
    assert_eq!(config.secret(), "configured");

    let from_config = PiiCipher::from_config(&config).unwrap();
    let direct = PiiCipher::from_secret("configured", &KeyDerivation::Legacy).unwrap();
    let blob = direct.encrypt("234567890124").unwrap();
    assert_eq!(from_config.decrypt(&blob).unwrap(), "234567890124");
  }

  #[test]
  fn debug_redacts_key() {
    let config = CipherConfig {
      encryption_key: Some("hunter2".into()),
      ..Default::default()
    };
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));
  }
}
