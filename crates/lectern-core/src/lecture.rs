//! Lecture — one timetabled class session for a subject.
//!
//! A lecture is identified by its [`unique_id`], derived from the subject
//! code, the session type and the per-subject class number. No other field
//! takes part in identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result, attachment::Attachment, subject::Subject};

// ─── Lecture type ────────────────────────────────────────────────────────────

/// The kind of class session. The literal is the variant name, exactly as it
/// appears in announcement headers and in [`unique_id`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum LectureType {
  Lecture,
  Practice,
  Seminar,
  Lab,
}

impl LectureType {
  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse an exact literal such as `Practice`.
  pub fn parse_literal(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownLectureType(s.to_owned()))
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Build the identity key `#<subject_id> <lecture_type>.<class_id>`.
pub fn unique_id(subject_id: &str, lecture_type: LectureType, class_id: u32) -> String {
  format!("#{subject_id} {lecture_type}.{class_id}")
}

// ─── Lecture ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
  pub date:                NaiveDate,
  pub subject:             Subject,
  pub lecture_type:        LectureType,
  /// Ordinal of this lecture (or practice) across the whole subject.
  pub class_id:            u32,
  /// Period index according to the bell schedule.
  pub absolute_lecture_id: u32,
  /// Position of the class among the periods actually attended that day.
  /// Differs from `absolute_lecture_id` when the day starts late.
  pub relative_lecture_id: u32,
  pub classroom:           String,
  pub content:             String,
  pub attachments:         Vec<Attachment>,
}

impl Lecture {
  pub fn unique_id(&self) -> String {
    unique_id(&self.subject.subject_id, self.lecture_type, self.class_id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::attachment::AttachmentType;

  fn lecture(class_id: u32, content: &str) -> Lecture {
    Lecture {
      date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
      subject: Subject::new("CS101", "Algorithms"),
      lecture_type: LectureType::Lecture,
      class_id,
      absolute_lecture_id: 3,
      relative_lecture_id: 2,
      classroom: "214".into(),
      content: content.into(),
      attachments: vec![],
    }
  }

  #[test]
  fn unique_id_format() {
    assert_eq!(lecture(1, "").unique_id(), "#CS101 Lecture.1");
    assert_eq!(unique_id("MA-2", LectureType::Practice, 12), "#MA-2 Practice.12");
  }

  #[test]
  fn unique_id_ignores_non_identity_fields() {
    let a = lecture(7, "first");
    let mut b = lecture(7, "second");
    b.date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    b.subject.name = "Renamed".into();
    b.classroom = "101".into();
    b.absolute_lecture_id = 1;
    b.attachments.push(crate::attachment::Attachment::new(AttachmentType::Photo, "f"));
    assert_eq!(a.unique_id(), b.unique_id());
  }

  #[test]
  fn lecture_type_literals_are_exact() {
    assert_eq!(LectureType::parse_literal("Practice").unwrap(), LectureType::Practice);
    assert!(LectureType::parse_literal("practice").is_err());
    assert!(LectureType::parse_literal("Lecturee").is_err());
  }

  #[test]
  fn lecture_serializes_to_json() {
    let json = serde_json::to_value(lecture(1, "body")).unwrap();
    assert_eq!(json["date"], "2024-09-02");
    assert_eq!(json["lecture_type"], "Lecture");
    assert_eq!(json["subject"]["subject_id"], "CS101");
  }
}
