//! Core types for the yatri registration backend.
//!
//! Holds the identity-number checksum validator, display masking, and the
//! member persistence interface. No HTTP or crypto dependencies live here;
//! `yatri-api` combines this crate with `yatri-cipher`.

pub mod error;
pub mod identity;
pub mod mask;
pub mod member;
pub mod store;
pub mod verhoeff;

pub use error::{Error, Result};
pub use identity::{IdentityNumber, Rejection, Verdict, validate};
pub use mask::{mask, mask_with};
