//! Lecture announcement parser.
//!
//! Pipeline:
//!   raw &str
//!     └─ tokenize()          → Announcement (tagged header lines + body)
//!          └─ parse_tag()       → subject code, lecture type, class number
//!          └─ parse_date()      → NaiveDate
//!          └─ parse_schedule()  → lecture numbers, classroom
//!               └─ assemble     → Lecture
//!
//! Layout of an announcement:
//!
//! ```text
//! <b>Algorithms</b>          subject name
//! #CS101 Lecture.1           tag
//! Mon, 02 September 2024     date
//! 3 (2) пара 214             schedule
//!                            separator (ignored)
//! Intro to complexity        body…
//! ```

use std::fmt;

use lectern_core::{
  lecture::{Lecture, LectureType},
  subject::Subject,
};

use crate::{
  date::parse_date,
  error::{Error, Result},
  ids::parse_ids,
};

/// Literal separating the lecture numbers from the classroom on the schedule
/// line.
pub const SCHEDULE_SEPARATOR: &str = " пара ";

const BOLD_OPEN: &str = "<b>";
const BOLD_CLOSE: &str = "</b>";

// ─── Tokenizer ───────────────────────────────────────────────────────────────

/// The fixed header lines of an announcement, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
  SubjectName,
  Tag,
  Date,
  Schedule,
  Separator,
}

impl fmt::Display for HeaderField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::SubjectName => "subject name",
      Self::Tag => "tag",
      Self::Date => "date",
      Self::Schedule => "schedule",
      Self::Separator => "separator",
    })
  }
}

struct Announcement<'a> {
  subject_name: &'a str,
  tag:          &'a str,
  date:         &'a str,
  schedule:     &'a str,
  body:         Vec<&'a str>,
}

fn tokenize(text: &str) -> Result<Announcement<'_>> {
  let mut lines = text.lines();
  let mut next = |field| lines.next().ok_or(Error::MissingLine(field));

  let subject_name = next(HeaderField::SubjectName)?;
  let tag = next(HeaderField::Tag)?;
  let date = next(HeaderField::Date)?;
  let schedule = next(HeaderField::Schedule)?;
  next(HeaderField::Separator)?;

  Ok(Announcement { subject_name, tag, date, schedule, body: lines.collect() })
}

// ─── Header lines ────────────────────────────────────────────────────────────

fn parse_subject_name(line: &str) -> &str {
  let line = line.trim();
  let line = line.strip_prefix(BOLD_OPEN).unwrap_or(line);
  line.strip_suffix(BOLD_CLOSE).unwrap_or(line)
}

/// `#<subject_id> <lecture_type>.<class_id>`
fn parse_tag(line: &str) -> Result<(&str, LectureType, u32)> {
  let malformed = || Error::MalformedHeader { field: HeaderField::Tag, line: line.to_owned() };

  let rest = line.trim().strip_prefix('#').ok_or_else(malformed)?;
  let mut tokens = rest.split_whitespace();
  let (Some(subject_id), Some(meta), None) = (tokens.next(), tokens.next(), tokens.next())
  else {
    return Err(malformed());
  };

  let (type_literal, class_literal) = meta.split_once('.').ok_or_else(malformed)?;
  let lecture_type = LectureType::parse_literal(type_literal)
    .map_err(|_| Error::UnknownLectureType(type_literal.to_owned()))?;
  let class_id = class_literal
    .parse()
    .map_err(|_| Error::InvalidClassId(class_literal.to_owned()))?;

  Ok((subject_id, lecture_type, class_id))
}

/// `<ids> пара <classroom>`
fn parse_schedule(line: &str) -> Result<((u32, u32), &str)> {
  let malformed = || Error::MalformedHeader { field: HeaderField::Schedule, line: line.to_owned() };

  let (ids, classroom) = line.split_once(SCHEDULE_SEPARATOR).ok_or_else(malformed)?;
  if classroom.contains(SCHEDULE_SEPARATOR) {
    return Err(malformed());
  }
  Ok((parse_ids(ids)?, classroom.trim()))
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Parse an announcement into a [`Lecture`] with no attachments.
///
/// `text` must already be decoded to plain text apart from the bold markers
/// around the subject name.
pub fn parse(text: &str) -> Result<Lecture> {
  let announcement = tokenize(text)?;

  let (subject_id, lecture_type, class_id) = parse_tag(announcement.tag)?;
  let date = parse_date(announcement.date)?;
  let ((absolute_lecture_id, relative_lecture_id), classroom) =
    parse_schedule(announcement.schedule)?;

  Ok(Lecture {
    date,
    subject: Subject::new(subject_id, parse_subject_name(announcement.subject_name)),
    lecture_type,
    class_id,
    absolute_lecture_id,
    relative_lecture_id,
    classroom: classroom.to_owned(),
    content: announcement.body.join("\n"),
    attachments: Vec::new(),
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  const ALGORITHMS: &str = "<b>Algorithms</b>\n#CS101 Lecture.1\nMon, 02 September \
                            2024\n3 (2) пара 214\n\nIntro to complexity";

  #[test]
  fn parses_full_announcement() {
    let lecture = parse(ALGORITHMS).unwrap();
    assert_eq!(lecture.date, NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
    assert_eq!(lecture.subject, Subject::new("CS101", "Algorithms"));
    assert_eq!(lecture.lecture_type, LectureType::Lecture);
    assert_eq!(lecture.class_id, 1);
    assert_eq!(lecture.absolute_lecture_id, 3);
    assert_eq!(lecture.relative_lecture_id, 2);
    assert_eq!(lecture.classroom, "214");
    assert_eq!(lecture.content, "Intro to complexity");
    assert!(lecture.attachments.is_empty());
    assert_eq!(lecture.unique_id(), "#CS101 Lecture.1");
  }

  #[test]
  fn parsing_is_deterministic() {
    assert_eq!(parse(ALGORITHMS).unwrap(), parse(ALGORITHMS).unwrap());
  }

  #[test]
  fn russian_announcement_with_single_number() {
    let text = "<b>Математический анализ</b>\n#MA201 Practice.12\nСр, 16 октября \
                2024\n4 пара 3-105\n\nРяды Тейлора\nДомашнее задание: №5–9";
    let lecture = parse(text).unwrap();
    assert_eq!(lecture.subject.name, "Математический анализ");
    assert_eq!(lecture.lecture_type, LectureType::Practice);
    assert_eq!(lecture.class_id, 12);
    assert_eq!(lecture.date, NaiveDate::from_ymd_opt(2024, 10, 16).unwrap());
    assert_eq!((lecture.absolute_lecture_id, lecture.relative_lecture_id), (4, 4));
    assert_eq!(lecture.classroom, "3-105");
    assert_eq!(lecture.content, "Ряды Тейлора\nДомашнее задание: №5–9");
  }

  #[test]
  fn bold_markers_are_optional() {
    let text = ALGORITHMS.replacen("<b>Algorithms</b>", "Algorithms", 1);
    assert_eq!(parse(&text).unwrap().subject.name, "Algorithms");
  }

  #[test]
  fn separator_line_is_discarded_and_body_may_be_empty() {
    let text = "<b>A</b>\n#A1 Lab.2\nTue, 03 September 2024\n1 пара 7\nanything";
    let lecture = parse(text).unwrap();
    assert_eq!(lecture.content, "");
  }

  #[test]
  fn crlf_line_endings() {
    let text = ALGORITHMS.replace('\n', "\r\n");
    let lecture = parse(&text).unwrap();
    assert_eq!(lecture.content, "Intro to complexity");
    assert_eq!(lecture.classroom, "214");
  }

  #[test]
  fn missing_lines_name_the_field() {
    let cases = [
      ("", HeaderField::SubjectName),
      ("<b>A</b>", HeaderField::Tag),
      ("<b>A</b>\n#A1 Lecture.1", HeaderField::Date),
      ("<b>A</b>\n#A1 Lecture.1\nMon, 02 September 2024", HeaderField::Schedule),
      ("<b>A</b>\n#A1 Lecture.1\nMon, 02 September 2024\n1 пара 2", HeaderField::Separator),
    ];
    for (text, field) in cases {
      let err = parse(text).unwrap_err();
      assert!(
        matches!(err, Error::MissingLine(f) if f == field),
        "{text:?}: expected missing {field}, got {err:?}"
      );
    }
  }

  #[test]
  fn malformed_tag_lines() {
    for tag in ["CS101 Lecture.1", "#CS101", "#CS101 Lecture1", "#CS101 Lecture.1 extra"] {
      let text = ALGORITHMS.replacen("#CS101 Lecture.1", tag, 1);
      let err = parse(&text).unwrap_err();
      assert!(
        matches!(err, Error::MalformedHeader { field: HeaderField::Tag, ref line } if line == tag),
        "{tag:?}: {err:?}"
      );
    }
  }

  #[test]
  fn unknown_lecture_type() {
    let text = ALGORITHMS.replacen("Lecture.1", "Webinar.1", 1);
    assert!(matches!(parse(&text).unwrap_err(), Error::UnknownLectureType(t) if t == "Webinar"));
  }

  #[test]
  fn non_numeric_class_id() {
    let text = ALGORITHMS.replacen("Lecture.1", "Lecture.one", 1);
    assert!(matches!(parse(&text).unwrap_err(), Error::InvalidClassId(c) if c == "one"));
  }

  #[test]
  fn bad_date_is_reported_with_raw_text() {
    let text = ALGORITHMS.replacen("September", "Septober", 1);
    let Error::InvalidDate { value, .. } = parse(&text).unwrap_err() else {
      panic!("expected InvalidDate")
    };
    assert_eq!(value, "Mon, 02 Septober 2024");
  }

  #[test]
  fn schedule_without_separator() {
    let text = ALGORITHMS.replacen("3 (2) пара 214", "3 (2) room 214", 1);
    assert!(matches!(
      parse(&text).unwrap_err(),
      Error::MalformedHeader { field: HeaderField::Schedule, .. }
    ));
  }

  #[test]
  fn schedule_with_repeated_separator() {
    let text = ALGORITHMS.replacen("3 (2) пара 214", "3 пара 214 пара 5", 1);
    let err = parse(&text).unwrap_err();
    assert!(
      matches!(
        err,
        Error::MalformedHeader { field: HeaderField::Schedule, ref line } if line == "3 пара 214 пара 5"
      ),
      "{err:?}"
    );
  }

  #[test]
  fn bad_lecture_numbers() {
    let text = ALGORITHMS.replacen("3 (2)", "3 (x)", 1);
    let Error::InvalidIds { value, .. } = parse(&text).unwrap_err() else {
      panic!("expected InvalidIds")
    };
    assert_eq!(value, "3 (x)");
  }
}
