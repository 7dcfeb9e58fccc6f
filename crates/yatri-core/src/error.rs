//! Error types for `yatri-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("check digit body must be exactly {expected} digits")]
  InvalidCheckBody { expected: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
