//! Error types for `lectern-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown lecture type: {0:?}")]
  UnknownLectureType(String),

  #[error("unknown attachment type: {0:?}")]
  UnknownAttachmentType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
