//! Configuration and router assembly for the yatri registration server.

use std::{path::Path, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use yatri_api::api_router;
use yatri_cipher::{CipherConfig, KeyDerivation, PiiCipher};
use yatri_core::store::MemberStore;

/// Prefix for environment overrides, e.g. `YATRI_ENCRYPTION_KEY`.
pub const ENV_PREFIX: &str = "YATRI";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub encryption_key: Option<String>,
  #[serde(default)]
  pub key_derivation: KeyDerivation,
}

impl ServerConfig {
  pub fn cipher(&self) -> CipherConfig {
    CipherConfig {
      encryption_key: self.encryption_key.clone(),
      key_derivation: self.key_derivation.clone(),
    }
  }
}

/// Load configuration from `path` (optional) layered under `YATRI_*`
/// environment variables.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix(ENV_PREFIX))
    .build()?
    .try_deserialize()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: the JSON API under `/api` plus a health probe.
pub fn app<S>(store: S, cipher: PiiCipher) -> Router
where
  S: MemberStore + 'static,
{
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api_router(Arc::new(store), Arc::new(cipher)))
    .layer(TraceLayer::new_for_http())
}
