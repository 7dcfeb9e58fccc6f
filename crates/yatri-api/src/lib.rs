//! JSON REST API for team member registration.
//!
//! Exposes an axum [`Router`] backed by any [`MemberStore`] and a shared
//! [`PiiCipher`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", yatri_api::api_router(store, cipher))
//! ```

pub mod error;
pub mod identity;
pub mod members;
pub mod memory;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use yatri_cipher::PiiCipher;
use yatri_core::store::MemberStore;

pub use error::ApiError;
pub use memory::MemoryStore;

/// Shared state threaded through the member handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub cipher: Arc<PiiCipher>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), cipher: Arc::clone(&self.cipher) }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, cipher: Arc<PiiCipher>) -> Router<()>
where
  S: MemberStore + 'static,
{
  Router::new()
    .route("/identity/validate", post(identity::validate))
    .route("/members", get(members::list::<S>).post(members::create::<S>))
    .route("/members/{id}", get(members::get_one::<S>))
    .with_state(AppState { store, cipher })
}
