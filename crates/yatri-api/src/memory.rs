//! In-process [`MemberStore`] for development and tests.
//!
//! Nothing survives a restart. Production deployments plug in their own
//! document-store backend behind the same trait.

use std::{convert::Infallible, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use yatri_core::{
  member::{Member, NewMember},
  store::MemberStore,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  members: Arc<RwLock<Vec<Member>>>,
}

impl MemberStore for MemoryStore {
  type Error = Infallible;

  async fn insert(&self, input: NewMember) -> Result<Member, Infallible> {
    let member = Member::from_new(Uuid::new_v4(), input, Utc::now());
    self.members.write().await.push(member.clone());
    Ok(member)
  }

  async fn get(&self, id: Uuid) -> Result<Option<Member>, Infallible> {
    let members = self.members.read().await;
    Ok(members.iter().find(|m| m.member_id == id).cloned())
  }

  async fn list(&self) -> Result<Vec<Member>, Infallible> {
    Ok(self.members.read().await.clone())
  }

  async fn find_by_identity_lookup(&self, token: &str) -> Result<Option<Member>, Infallible> {
    let members = self.members.read().await;
    Ok(members.iter().find(|m| m.identity_lookup == token).cloned())
  }

  async fn find_by_phone_lookup(&self, token: &str) -> Result<Option<Member>, Infallible> {
    let members = self.members.read().await;
    Ok(members.iter().find(|m| m.phone_lookup.as_deref() == Some(token)).cloned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_member(identity_lookup: &str, phone_lookup: Option<&str>) -> NewMember {
    NewMember {
      team:               "Badrinath".into(),
      name:               "Ravi".into(),
      identity_encrypted: "00:00:00".into(),
      identity_lookup:    identity_lookup.into(),
      phone_encrypted:    None,
      phone_lookup:       phone_lookup.map(str::to_owned),
    }
  }

  #[tokio::test]
  async fn insert_and_get() {
    let store = MemoryStore::default();
    let member = store.insert(new_member("tok-a", None)).await.unwrap();
    let fetched = store.get(member.member_id).await.unwrap().unwrap();
    assert_eq!(fetched.identity_lookup, "tok-a");
    assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn list_preserves_registration_order() {
    let store = MemoryStore::default();
    store.insert(new_member("tok-a", None)).await.unwrap();
    store.insert(new_member("tok-b", None)).await.unwrap();
    let all = store.list().await.unwrap();
    let tokens: Vec<&str> = all.iter().map(|m| m.identity_lookup.as_str()).collect();
    assert_eq!(tokens, ["tok-a", "tok-b"]);
  }

  #[tokio::test]
  async fn lookups_match_exact_tokens() {
    let store = MemoryStore::default();
    store.insert(new_member("tok-a", Some("ph-a"))).await.unwrap();

    assert!(store.find_by_identity_lookup("tok-a").await.unwrap().is_some());
    assert!(store.find_by_identity_lookup("tok-b").await.unwrap().is_none());
    assert!(store.find_by_phone_lookup("ph-a").await.unwrap().is_some());
    assert!(store.find_by_phone_lookup("tok-a").await.unwrap().is_none());
  }
}
