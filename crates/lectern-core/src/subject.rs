//! Subject — the course a lecture belongs to.
//!
//! Subjects are never written on their own. The store creates one the first
//! time a lecture references its code and reuses it afterwards.

use serde::{Deserialize, Serialize};

/// A course, identified by a short code such as `CS101`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
  pub subject_id: String,
  pub name:       String,
}

impl Subject {
  pub fn new(subject_id: impl Into<String>, name: impl Into<String>) -> Self {
    Self { subject_id: subject_id.into(), name: name.into() }
  }
}
