//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` strings so that text ordering matches
//! calendar ordering. Enums are stored as their literal names. Lecture
//! numbers are `u32` in the domain and `INTEGER` (i64) in SQLite.

use chrono::NaiveDate;
use lectern_core::{
  attachment::{Attachment, AttachmentType},
  lecture::{Lecture, LectureType},
  subject::Subject,
};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_lecture_type(t: LectureType) -> &'static str { t.as_str() }

pub fn decode_lecture_type(s: &str) -> Result<LectureType> { Ok(LectureType::parse_literal(s)?) }

pub fn encode_attachment_type(t: AttachmentType) -> &'static str { t.as_str() }

pub fn decode_attachment_type(s: &str) -> Result<AttachmentType> {
  Ok(AttachmentType::parse_literal(s)?)
}

// ─── Numbers ─────────────────────────────────────────────────────────────────

pub fn encode_number(n: u32) -> i64 { i64::from(n) }

pub fn decode_number(column: &str, n: i64) -> Result<u32> {
  u32::try_from(n).map_err(|_| Error::Decode(format!("{column} out of range: {n}")))
}

// ─── Write-side rows ─────────────────────────────────────────────────────────

/// Column values for one `lectures` row plus its subject, owned so they can
/// be moved onto the database thread.
pub struct LectureRow {
  pub unique_id:           String,
  pub date:                String,
  pub lecture_type:        &'static str,
  pub class_id:            i64,
  pub absolute_lecture_id: i64,
  pub relative_lecture_id: i64,
  pub classroom:           String,
  pub content:             String,
  pub subject_id:          String,
  pub subject_name:        String,
}

impl LectureRow {
  pub fn new(lecture: &Lecture) -> Self {
    Self {
      unique_id:           lecture.unique_id(),
      date:                encode_date(lecture.date),
      lecture_type:        encode_lecture_type(lecture.lecture_type),
      class_id:            encode_number(lecture.class_id),
      absolute_lecture_id: encode_number(lecture.absolute_lecture_id),
      relative_lecture_id: encode_number(lecture.relative_lecture_id),
      classroom:           lecture.classroom.clone(),
      content:             lecture.content.clone(),
      subject_id:          lecture.subject.subject_id.clone(),
      subject_name:        lecture.subject.name.clone(),
    }
  }
}

/// Column values for one `attachments` row, minus the owning lecture id.
pub struct AttachmentRow {
  pub attachment_type: &'static str,
  pub file_id:         String,
  pub ocr_text:        Option<String>,
}

impl AttachmentRow {
  pub fn new(attachment: &Attachment) -> Self {
    Self {
      attachment_type: encode_attachment_type(attachment.attachment_type),
      file_id:         attachment.file_id.clone(),
      ocr_text:        attachment.ocr_text.clone(),
    }
  }
}

// ─── Read-side rows ──────────────────────────────────────────────────────────

/// Raw values read from a `lectures` row joined with its subject.
pub struct RawLecture {
  pub unique_id:           String,
  pub date:                String,
  pub lecture_type:        String,
  pub class_id:            Option<i64>,
  pub absolute_lecture_id: i64,
  pub relative_lecture_id: Option<i64>,
  pub classroom:           Option<String>,
  pub content:             Option<String>,
  pub subject:             RawSubject,
  // filled from the attachments table, in id order
  pub attachments:         Vec<RawAttachment>,
}

impl RawLecture {
  pub fn into_lecture(self) -> Result<Lecture> {
    let class_id = self
      .class_id
      .ok_or_else(|| Error::Decode(format!("lecture {:?} has no class_id", self.unique_id)))?;
    let absolute_lecture_id = decode_number("absolute_lecture_id", self.absolute_lecture_id)?;
    let relative_lecture_id = match self.relative_lecture_id {
      Some(n) => decode_number("relative_lecture_id", n)?,
      None => absolute_lecture_id,
    };

    Ok(Lecture {
      date: decode_date(&self.date)?,
      subject: self.subject.into_subject(),
      lecture_type: decode_lecture_type(&self.lecture_type)?,
      class_id: decode_number("class_id", class_id)?,
      absolute_lecture_id,
      relative_lecture_id,
      classroom: self.classroom.unwrap_or_default(),
      content: self.content.unwrap_or_default(),
      attachments: self
        .attachments
        .into_iter()
        .map(RawAttachment::into_attachment)
        .collect::<Result<_>>()?,
    })
  }
}

/// Raw values read from an `attachments` row.
pub struct RawAttachment {
  pub lecture_id:      String,
  pub attachment_type: String,
  pub file_id:         String,
  pub ocr_text:        Option<String>,
}

impl RawAttachment {
  pub fn into_attachment(self) -> Result<Attachment> {
    Ok(Attachment {
      attachment_type: decode_attachment_type(&self.attachment_type)?,
      file_id:         self.file_id,
      ocr_text:        self.ocr_text,
    })
  }
}

/// Raw values read from a `subjects` row.
pub struct RawSubject {
  pub subject_id: String,
  pub name:       String,
}

impl RawSubject {
  pub fn into_subject(self) -> Subject { Subject { subject_id: self.subject_id, name: self.name } }
}
