//! Error type for `normas-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database file could not be opened or its schema could not be
  /// created.
  #[error("storage unavailable: {0}")]
  StorageUnavailable(#[source] tokio_rusqlite::Error),

  /// `insert_regulation` was given a jurisdiction other than the two seeded
  /// ones. Nothing was written.
  #[error("invalid jurisdiction: {0:?}")]
  InvalidJurisdiction(String),

  #[error("core error: {0}")]
  Core(#[from] normas_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
