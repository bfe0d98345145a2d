//! Error types for the lectern announcement parser.

use thiserror::Error;

use crate::lecture::HeaderField;

#[derive(Debug, Error)]
pub enum Error {
  #[error("announcement has no {0} line")]
  MissingLine(HeaderField),

  #[error("malformed {field} line: {line:?}")]
  MalformedHeader { field: HeaderField, line: String },

  #[error("unknown lecture type: {0:?}")]
  UnknownLectureType(String),

  #[error("invalid class number: {0:?}")]
  InvalidClassId(String),

  #[error("invalid date {value:?}: {reason}")]
  InvalidDate { value: String, reason: &'static str },

  #[error("invalid lecture numbers {value:?}: {reason}")]
  InvalidIds { value: String, reason: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
