//! Encryption-at-rest for member PII.
//!
//! [`PiiCipher`] is constructed once from configuration and shared by
//! reference; it holds the only copy of the key material. It produces
//! randomized `iv:ciphertext:tag` blobs for recovery and keyed lookup tokens
//! for exact-match deduplication. Blobs are never compared to each other.

mod blob;
mod cipher;
mod digest;
mod key;

pub mod config;
pub mod error;

pub use blob::{EncryptedBlob, IV_LEN, TAG_LEN};
pub use cipher::{PiiCipher, PiiField};
pub use config::{CipherConfig, DEV_DEFAULT_SECRET};
pub use digest::hash;
pub use error::{Error, Result};
pub use key::{KEY_LEN, KeyDerivation};
