//! 12-digit identity number validation.
//!
//! Untrusted input goes through [`IdentityNumber::parse`] (or [`validate`]
//! for the boundary verdict). Structural rules are checked first, in a fixed
//! order, and the Verhoeff checksum last. Nothing in here logs the candidate.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
  mask::mask,
  verhoeff::{self, NUMBER_LEN},
};

/// Dummy and sequential numbers that are well-formed enough to reach the
/// checksum step but must never be accepted.
const DENY_LIST: [&str; 6] = [
  "123456789012",
  "210987654321",
  "012345678901",
  "109876543210",
  "000000000000",
  "111111111111",
];

// ─── Rejection ───────────────────────────────────────────────────────────────

/// Why a candidate identity number was refused.
///
/// The `Display` text is shown to end users verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
  #[error("Identity number is required")]
  Missing,
  #[error("Identity number must be exactly 12 digits")]
  WrongLength,
  #[error("Identity number must contain only digits")]
  NonDigit,
  #[error("Identity number cannot consist of a single repeated digit")]
  RepeatedDigit,
  #[error("Identity number matches a known test or placeholder pattern")]
  KnownPlaceholder,
  #[error("Identity number cannot start with 0 or 1")]
  ReservedPrefix,
  #[error("Identity number failed checksum verification")]
  ChecksumMismatch,
}

impl Rejection {
  /// Stable machine-readable identifier.
  pub fn code(self) -> &'static str {
    match self {
      Rejection::Missing => "missing",
      Rejection::WrongLength => "wrong_length",
      Rejection::NonDigit => "non_digit",
      Rejection::RepeatedDigit => "repeated_digit",
      Rejection::KnownPlaceholder => "known_placeholder",
      Rejection::ReservedPrefix => "reserved_prefix",
      Rejection::ChecksumMismatch => "checksum_mismatch",
    }
  }
}

// ─── IdentityNumber ──────────────────────────────────────────────────────────

/// A validated identity number.
///
/// `Debug` and `Display` only ever show the masked form; use
/// [`IdentityNumber::as_str`] when the plaintext is genuinely needed
/// (encryption, lookup tokens).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdentityNumber(String);

impl IdentityNumber {
  /// Normalise and validate untrusted input.
  ///
  /// All whitespace is removed before any rule is applied, so grouped input
  /// such as `"2345 6789 0124"` is accepted.
  pub fn parse(raw: &str) -> Result<Self, Rejection> {
    let candidate: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if candidate.is_empty() {
      return Err(Rejection::Missing);
    }
    if candidate.chars().count() != NUMBER_LEN {
      return Err(Rejection::WrongLength);
    }
    if !candidate.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Rejection::NonDigit);
    }

    let digits: Vec<u8> = candidate.bytes().map(|b| b - b'0').collect();
    if digits.iter().all(|&d| d == digits[0]) {
      return Err(Rejection::RepeatedDigit);
    }
    if DENY_LIST.contains(&candidate.as_str()) {
      return Err(Rejection::KnownPlaceholder);
    }
    if digits[0] < 2 {
      return Err(Rejection::ReservedPrefix);
    }
    if !verhoeff::checksum_ok(&digits) {
      return Err(Rejection::ChecksumMismatch);
    }

    Ok(Self(candidate))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Display form with all but the last four digits hidden.
  pub fn masked(&self) -> String {
    mask(&self.0)
  }
}

impl fmt::Debug for IdentityNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IdentityNumber").field(&self.masked()).finish()
  }
}

impl fmt::Display for IdentityNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.masked())
  }
}

// ─── Verdict ─────────────────────────────────────────────────────────────────

/// Boundary form of a validation outcome, returned to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
  pub valid:  bool,
  pub reason: String,
}

impl Verdict {
  pub const VALID_REASON: &'static str = "Identity number is valid";

  pub fn accepted() -> Self {
    Self { valid: true, reason: Self::VALID_REASON.to_owned() }
  }
}

impl From<Rejection> for Verdict {
  fn from(rejection: Rejection) -> Self {
    Self { valid: false, reason: rejection.to_string() }
  }
}

/// Validate a raw candidate. Never fails; malformed input is a verdict.
pub fn validate(raw: &str) -> Verdict {
  match IdentityNumber::parse(raw) {
    Ok(_) => Verdict::accepted(),
    Err(rejection) => rejection.into(),
  }
}
