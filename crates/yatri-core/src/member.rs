//! Team member records as handed to and returned from a [`MemberStore`].
//!
//! Sensitive fields are never held in plaintext here: each one is carried as
//! an encrypted blob (recoverable by the cipher) plus a keyed lookup token
//! (equality only). Both are produced by `yatri-cipher`.
//!
//! [`MemberStore`]: crate::store::MemberStore

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input to [`crate::store::MemberStore::insert`].
/// `member_id` and `registered_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewMember {
  pub team:               String,
  pub name:               String,
  pub identity_encrypted: String,
  pub identity_lookup:    String,
  pub phone_encrypted:    Option<String>,
  pub phone_lookup:       Option<String>,
}

/// A persisted team member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
  pub member_id:          Uuid,
  pub team:               String,
  pub name:               String,
  /// `iv:ciphertext:tag` blob; only ever decrypted for display masking or
  /// privileged views.
  pub identity_encrypted: String,
  pub identity_lookup:    String,
  pub phone_encrypted:    Option<String>,
  pub phone_lookup:       Option<String>,
  pub registered_at:      DateTime<Utc>,
}

impl Member {
  /// Materialise a stored record from a [`NewMember`].
  pub fn from_new(member_id: Uuid, input: NewMember, registered_at: DateTime<Utc>) -> Self {
    Self {
      member_id,
      team: input.team,
      name: input.name,
      identity_encrypted: input.identity_encrypted,
      identity_lookup: input.identity_lookup,
      phone_encrypted: input.phone_encrypted,
      phone_lookup: input.phone_lookup,
      registered_at,
    }
  }
}
