//! The `MemberStore` trait.
//!
//! Implemented by persistence backends. The registration layer (`yatri-api`)
//! depends on this abstraction only; it never sees plaintext leave the
//! cipher, and duplicate checks go through the lookup-token finders.

use std::future::Future;

use uuid::Uuid;

use crate::member::{Member, NewMember};

/// Abstraction over a team member store backend.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded tokio runtime.
pub trait MemberStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new member and return the stored record.
  fn insert(
    &self,
    input: NewMember,
  ) -> impl Future<Output = Result<Member, Self::Error>> + Send + '_;

  /// Retrieve a member by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Member>, Self::Error>> + Send + '_;

  /// List all members in registration order.
  fn list(&self) -> impl Future<Output = Result<Vec<Member>, Self::Error>> + Send + '_;

  /// Find a member whose identity lookup token equals `token`.
  fn find_by_identity_lookup<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Option<Member>, Self::Error>> + Send + 'a;

  /// Find a member whose phone lookup token equals `token`.
  fn find_by_phone_lookup<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Option<Member>, Self::Error>> + Send + 'a;
}
