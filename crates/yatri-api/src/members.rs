//! Handlers for `/members` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/members` | Masked views of every member |
//! | `POST` | `/members` | Body: [`RegisterBody`]; 400 on invalid identity number, 409 on duplicate |
//! | `GET`  | `/members/:id` | 404 if not found |
//!
//! Responses never carry plaintext identity or phone numbers. Masks are
//! recomputed from the stored blob on every read.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use yatri_cipher::{PiiCipher, PiiField};
use yatri_core::{
  IdentityNumber, mask,
  member::{Member, NewMember},
  store::MemberStore,
};

use crate::{AppState, error::ApiError};

// ─── View ─────────────────────────────────────────────────────────────────────

/// Low-privilege representation of a [`Member`].
#[derive(Debug, Serialize)]
pub struct MemberView {
  pub member_id:       Uuid,
  pub team:            String,
  pub name:            String,
  pub identity_number: String,
  pub phone:           Option<String>,
  pub registered_at:   DateTime<Utc>,
}

impl MemberView {
  /// Decrypt and mask the sensitive fields of `member`.
  ///
  /// A decryption failure here means stored data and the configured key
  /// disagree, so it is logged as an operational alarm.
  pub fn render(member: &Member, cipher: &PiiCipher) -> Result<Self, ApiError> {
    let decrypted = cipher.decrypt(&member.identity_encrypted).and_then(|identity| {
      let phone = cipher.decrypt_optional(member.phone_encrypted.as_deref())?;
      Ok((identity, phone))
    });
    let (identity, phone) = decrypted.inspect_err(|e| {
      tracing::error!(
        member_id = %member.member_id,
        error = %e,
        "stored PII failed to decrypt; check encryption_key configuration"
      );
    })?;

    Ok(Self {
      member_id:       member.member_id,
      team:            member.team.clone(),
      name:            member.name.clone(),
      identity_number: mask(&identity),
      phone:           phone.as_deref().map(mask),
      registered_at:   member.registered_at,
    })
  }
}

fn store_error<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(e))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /members`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<MemberView>>, ApiError>
where
  S: MemberStore,
{
  let members = state.store.list().await.map_err(store_error)?;
  let views = members
    .iter()
    .map(|m| MemberView::render(m, &state.cipher))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(Json(views))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterBody {
  pub team:            String,
  pub name:            String,
  #[serde(default)]
  pub identity_number: String,
  pub phone:           Option<String>,
}

/// Strip whitespace and dashes from a phone number before encryption and
/// tokenisation, so formatting differences do not defeat deduplication.
fn normalise_phone(raw: &str) -> String {
  raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect()
}

/// `POST /members` — body: `{"team":"...","name":"...","identity_number":"...","phone":"..."}`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MemberStore,
{
  let team = body.team.trim();
  let name = body.name.trim();
  if team.is_empty() || name.is_empty() {
    return Err(ApiError::BadRequest("team and name are required".into()));
  }

  let identity =
    IdentityNumber::parse(&body.identity_number).map_err(ApiError::Invalid)?;
  let phone = body
    .phone
    .as_deref()
    .map(normalise_phone)
    .filter(|p| !p.is_empty());

  let cipher = &state.cipher;
  let identity_lookup = cipher.lookup_token(PiiField::IdentityNumber, identity.as_str());
  if state
    .store
    .find_by_identity_lookup(&identity_lookup)
    .await
    .map_err(store_error)?
    .is_some()
  {
    tracing::info!(identity = %identity, "rejected duplicate identity number");
    return Err(ApiError::Conflict("identity number is already registered".into()));
  }

  let phone_lookup = phone
    .as_deref()
    .map(|p| cipher.lookup_token(PiiField::Phone, p));
  if let Some(token) = &phone_lookup
    && state
      .store
      .find_by_phone_lookup(token)
      .await
      .map_err(store_error)?
      .is_some()
  {
    return Err(ApiError::Conflict("phone number is already registered".into()));
  }

  let input = NewMember {
    team: team.to_owned(),
    name: name.to_owned(),
    identity_encrypted: cipher.encrypt(identity.as_str())?,
    identity_lookup,
    phone_encrypted: cipher.encrypt_optional(phone.as_deref())?,
    phone_lookup,
  };

  let member = state.store.insert(input).await.map_err(store_error)?;
  tracing::info!(
    member_id = %member.member_id,
    team = %member.team,
    identity = %identity,
    "member registered"
  );

  let view = MemberView::render(&member, cipher)?;
  Ok((StatusCode::CREATED, Json(view)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /members/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<MemberView>, ApiError>
where
  S: MemberStore,
{
  let member = state
    .store
    .get(id)
    .await
    .map_err(store_error)?
    .ok_or_else(|| ApiError::NotFound(format!("member {id} not found")))?;
  Ok(Json(MemberView::render(&member, &state.cipher)?))
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use yatri_cipher::KeyDerivation;

  use super::*;
  use crate::{MemoryStore, api_router};

  fn cipher() -> Arc<PiiCipher> {
    Arc::new(PiiCipher::from_secret("api-test-secret", &KeyDerivation::Legacy).unwrap())
  }

  async fn call(router: axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(b) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(b.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let res = router.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
  }

  fn registration(identity: &str, phone: Option<&str>) -> Value {
    json!({
      "team": "Kedarnath 2026",
      "name": "Asha",
      "identity_number": identity,
      "phone": phone,
    })
  }

  #[tokio::test]
  async fn validate_endpoint_reports_verdict() {
    let router = api_router(Arc::new(MemoryStore::default()), cipher());

    let (status, body) = call(
      router.clone(),
      "POST",
      "/identity/validate",
      Some(json!({ "identity_number": "234567890124" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);

    let (status, body) = call(
      router,
      "POST",
      "/identity/validate",
      Some(json!({ "identity_number": "135724680241" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["reason"], "Identity number cannot start with 0 or 1");
  }

  #[tokio::test]
  async fn register_stores_encrypted_and_returns_masked() {
    let store = Arc::new(MemoryStore::default());
    let cipher = cipher();
    let router = api_router(store.clone(), cipher.clone());

    let (status, body) = call(
      router,
      "POST",
      "/members",
      Some(registration("2345 6789 0124", Some("98765-43210"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["identity_number"], "********0124");
    assert_eq!(body["phone"], "******3210");

    let stored = store.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    let member = &stored[0];
    assert!(!member.identity_encrypted.contains("234567890124"));
    assert_eq!(cipher.decrypt(&member.identity_encrypted).unwrap(), "234567890124");
    assert_eq!(
      cipher.decrypt_optional(member.phone_encrypted.as_deref()).unwrap().as_deref(),
      Some("9876543210")
    );
  }

  #[tokio::test]
  async fn invalid_identity_is_rejected_verbatim() {
    let store = Arc::new(MemoryStore::default());
    let router = api_router(store.clone(), cipher());

    let (status, body) =
      call(router, "POST", "/members", Some(registration("234567890123", None))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Identity number failed checksum verification");
    assert_eq!(body["code"], "checksum_mismatch");
    assert!(store.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn duplicate_identity_is_conflict() {
    let router = api_router(Arc::new(MemoryStore::default()), cipher());

    let (status, _) = call(
      router.clone(),
      "POST",
      "/members",
      Some(registration("234567890124", None)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Same number, different formatting; ciphertexts differ but tokens match.
    let (status, body) = call(
      router,
      "POST",
      "/members",
      Some(registration(" 234567 890124 ", None)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "identity number is already registered");
  }

  #[tokio::test]
  async fn duplicate_phone_is_conflict() {
    let router = api_router(Arc::new(MemoryStore::default()), cipher());

    let (status, _) = call(
      router.clone(),
      "POST",
      "/members",
      Some(registration("234567890124", Some("9876543210"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
      router,
      "POST",
      "/members",
      Some(registration("499187321841", Some("98765 43210"))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn empty_phone_is_not_encrypted() {
    let store = Arc::new(MemoryStore::default());
    let router = api_router(store.clone(), cipher());

    let (status, body) = call(
      router,
      "POST",
      "/members",
      Some(registration("234567890124", Some("  "))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["phone"], Value::Null);

    let member = &store.list().await.unwrap()[0];
    assert!(member.phone_encrypted.is_none());
    assert!(member.phone_lookup.is_none());
  }

  #[tokio::test]
  async fn missing_team_is_bad_request() {
    let router = api_router(Arc::new(MemoryStore::default()), cipher());
    let mut body = registration("234567890124", None);
    body["team"] = json!("  ");
    let (status, _) = call(router, "POST", "/members", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn get_one_and_list() {
    let router = api_router(Arc::new(MemoryStore::default()), cipher());

    let (_, created) = call(
      router.clone(),
      "POST",
      "/members",
      Some(registration("234567890124", None)),
    )
    .await;
    let id = created["member_id"].as_str().unwrap().to_owned();

    let (status, fetched) = call(router.clone(), "GET", &format!("/members/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["identity_number"], "********0124");

    let (status, all) = call(router.clone(), "GET", "/members", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, _) =
      call(router, "GET", &format!("/members/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn key_mismatch_is_opaque_server_error() {
    let store = Arc::new(MemoryStore::default());
    let writer = api_router(store.clone(), cipher());
    let (status, _) = call(
      writer,
      "POST",
      "/members",
      Some(registration("234567890124", None)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let other = Arc::new(PiiCipher::from_secret("rotated", &KeyDerivation::Legacy).unwrap());
    let reader = api_router(store, other);
    let (status, body) = call(reader, "GET", "/members", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "decryption failed");
  }
}
