//! The `LectureStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `lectern-store-sqlite`).
//! Higher layers (`lectern-cli`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{attachment::Attachment, lecture::Lecture, subject::Subject};

/// Abstraction over a lectern storage backend.
///
/// Every method is one logical operation: it is either applied in full or not
/// at all. "Not found" is reported as `None` (or `false`), never as an error.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes.
pub trait LectureStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new lecture together with its attachments.
  ///
  /// The subject is created if its code is unknown; an existing subject is
  /// reused as-is (its name is not updated). Fails if a lecture with the
  /// same [`Lecture::unique_id`] already exists; nothing is written in that
  /// case.
  fn add(
    &self,
    lecture: Lecture,
  ) -> impl Future<Output = Result<Lecture, Self::Error>> + Send + '_;

  /// Replace the content of an existing lecture and return the updated
  /// record. Returns `None` if no lecture has this id.
  fn update_content<'a>(
    &'a self,
    unique_id: &'a str,
    content: &'a str,
  ) -> impl Future<Output = Result<Option<Lecture>, Self::Error>> + Send + 'a;

  /// Append attachments to an existing lecture, preserving order. Returns
  /// `None` (and writes nothing) if no lecture has this id.
  fn add_attachments<'a>(
    &'a self,
    unique_id: &'a str,
    attachments: Vec<Attachment>,
  ) -> impl Future<Output = Result<Option<Lecture>, Self::Error>> + Send + 'a;

  /// Delete a lecture and its attachments. Returns whether it existed.
  fn delete<'a>(
    &'a self,
    unique_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Fetch a single lecture with its subject and attachments.
  fn get<'a>(
    &'a self,
    unique_id: &'a str,
  ) -> impl Future<Output = Result<Option<Lecture>, Self::Error>> + Send + 'a;

  /// All lectures of a subject, ascending by date. Lectures sharing a date
  /// keep the order in which they were added.
  fn list_by_subject<'a>(
    &'a self,
    subject_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Lecture>, Self::Error>> + Send + 'a;

  /// All lectures, ascending by date with the same tie-break as
  /// [`list_by_subject`](Self::list_by_subject).
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Lecture>, Self::Error>> + Send + '_;

  /// Retrieve a subject by code. Returns `None` if not found.
  fn get_subject<'a>(
    &'a self,
    subject_id: &'a str,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + 'a;

  /// All known subjects, ordered by code.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;
}
