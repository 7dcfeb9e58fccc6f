//! Handler for `POST /identity/validate`.

use axum::Json;
use serde::Deserialize;
use yatri_core::{Verdict, validate as validate_identity};

#[derive(Deserialize)]
pub struct ValidateBody {
  #[serde(default)]
  pub identity_number: String,
}

/// `POST /identity/validate` — body: `{"identity_number":"..."}`
///
/// Always 200; a rejection is a verdict, not an error.
pub async fn validate(Json(body): Json<ValidateBody>) -> Json<Verdict> {
  Json(validate_identity(&body.identity_number))
}
