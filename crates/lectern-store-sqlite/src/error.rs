//! Error type for `lectern-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] lectern_core::Error),

  /// Connection or transaction failure. No partial write survives it.
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored row could not be turned back into a domain value.
  #[error("corrupt row: {0}")]
  Decode(String),

  /// Attempted to add a lecture whose unique id is already taken.
  #[error("lecture {0:?} already exists")]
  DuplicateLecture(String),
}

impl Error {
  pub fn is_duplicate(&self) -> bool { matches!(self, Self::DuplicateLecture(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
