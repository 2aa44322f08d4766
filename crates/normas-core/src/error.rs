//! Error types for `normas-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown regulation type: {0:?}")]
  UnknownRegulationKind(String),

  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  #[error("unknown jurisdiction: {0:?}")]
  UnknownJurisdiction(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
