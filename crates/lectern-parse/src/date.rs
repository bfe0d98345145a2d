//! Localized dates of the form `<weekday>, <day> <month> <year>`.
//!
//! Weekday and month names are resolved through the static [`Vocabulary`]
//! tables below. Nothing here reads or changes the process locale, so parsing
//! behaves the same on every host and from every thread.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{Error, Result};

// ─── Vocabulary tables ───────────────────────────────────────────────────────

/// Calendar vocabulary of one language.
///
/// Every entry lists the accepted spellings of a weekday or month; the first
/// spelling is the one [`format_date`] writes. Matching is case-insensitive.
#[derive(Debug)]
pub struct Vocabulary {
  /// Monday first.
  weekdays: [&'static [&'static str]; 7],
  /// January first.
  months:   [&'static [&'static str]; 12],
}

pub const RUSSIAN: Vocabulary = Vocabulary {
  weekdays: [
    &["Пн", "Понедельник"],
    &["Вт", "Вторник"],
    &["Ср", "Среда"],
    &["Чт", "Четверг"],
    &["Пт", "Пятница"],
    &["Сб", "Суббота"],
    &["Вс", "Воскресенье"],
  ],
  // Genitive first: "02 сентября 2024" is how dates are written in running
  // text; the nominative and abbreviated forms are accepted as well.
  months:   [
    &["января", "январь", "янв"],
    &["февраля", "февраль", "фев"],
    &["марта", "март", "мар"],
    &["апреля", "апрель", "апр"],
    &["мая", "май"],
    &["июня", "июнь", "июн"],
    &["июля", "июль", "июл"],
    &["августа", "август", "авг"],
    &["сентября", "сентябрь", "сент", "сен"],
    &["октября", "октябрь", "окт"],
    &["ноября", "ноябрь", "ноя"],
    &["декабря", "декабрь", "дек"],
  ],
};

pub const ENGLISH: Vocabulary = Vocabulary {
  weekdays: [
    &["Mon", "Monday"],
    &["Tue", "Tuesday", "Tues"],
    &["Wed", "Wednesday"],
    &["Thu", "Thursday", "Thur", "Thurs"],
    &["Fri", "Friday"],
    &["Sat", "Saturday"],
    &["Sun", "Sunday"],
  ],
  months:   [
    &["January", "Jan"],
    &["February", "Feb"],
    &["March", "Mar"],
    &["April", "Apr"],
    &["May"],
    &["June", "Jun"],
    &["July", "Jul"],
    &["August", "Aug"],
    &["September", "Sep", "Sept"],
    &["October", "Oct"],
    &["November", "Nov"],
    &["December", "Dec"],
  ],
};

/// Vocabularies tried by [`parse_date`], in order.
pub const VOCABULARIES: &[&Vocabulary] = &[&RUSSIAN, &ENGLISH];

const WEEKDAYS: [Weekday; 7] = [
  Weekday::Mon,
  Weekday::Tue,
  Weekday::Wed,
  Weekday::Thu,
  Weekday::Fri,
  Weekday::Sat,
  Weekday::Sun,
];

fn eq_ignore_case(a: &str, b: &str) -> bool {
  a.chars()
    .flat_map(char::to_lowercase)
    .eq(b.chars().flat_map(char::to_lowercase))
}

impl Vocabulary {
  pub fn weekday(&self, token: &str) -> Option<Weekday> {
    self
      .weekdays
      .iter()
      .position(|names| names.iter().any(|n| eq_ignore_case(n, token)))
      .map(|i| WEEKDAYS[i])
  }

  /// Month number (1-based) for `token`.
  pub fn month(&self, token: &str) -> Option<u32> {
    self
      .months
      .iter()
      .position(|names| names.iter().any(|n| eq_ignore_case(n, token)))
      .map(|i| i as u32 + 1)
  }

  fn weekday_name(&self, weekday: Weekday) -> &'static str {
    self.weekdays[weekday.num_days_from_monday() as usize][0]
  }

  fn month_name(&self, month: u32) -> &'static str { self.months[month as usize - 1][0] }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

fn invalid(value: &str, reason: &'static str) -> Error {
  Error::InvalidDate { value: value.to_owned(), reason }
}

fn split_weekday(s: &str) -> Result<(&str, &str)> {
  s.trim()
    .split_once(',')
    .map(|(weekday, rest)| (weekday.trim(), rest))
    .ok_or_else(|| invalid(s, "expected `<weekday>, <day> <month> <year>`"))
}

/// Parse `s`, picking the vocabulary that recognises its weekday.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  let (weekday, _) = split_weekday(s)?;
  let vocabulary = VOCABULARIES
    .iter()
    .find(|v| v.weekday(weekday).is_some())
    .ok_or_else(|| invalid(s, "unrecognised weekday"))?;
  parse_date_in(s, vocabulary)
}

/// Parse `s` using one specific vocabulary.
///
/// The weekday must be a known name but is not checked against the
/// resulting date.
pub fn parse_date_in(s: &str, vocabulary: &Vocabulary) -> Result<NaiveDate> {
  let (weekday, rest) = split_weekday(s)?;
  if vocabulary.weekday(weekday).is_none() {
    return Err(invalid(s, "unrecognised weekday"));
  }

  let mut tokens = rest.split_whitespace();
  let (Some(day), Some(month), Some(year), None) =
    (tokens.next(), tokens.next(), tokens.next(), tokens.next())
  else {
    return Err(invalid(s, "expected `<day> <month> <year>` after the weekday"));
  };

  let day = digits(day, 1..=2).ok_or_else(|| invalid(s, "day is not a number"))?;
  let month = vocabulary
    .month(month)
    .ok_or_else(|| invalid(s, "unrecognised month"))?;
  let year = digits(year, 4..=4).ok_or_else(|| invalid(s, "year is not a four-digit number"))?;

  NaiveDate::from_ymd_opt(year as i32, month, day)
    .ok_or_else(|| invalid(s, "no such calendar date"))
}

fn digits(token: &str, len: std::ops::RangeInclusive<usize>) -> Option<u32> {
  if !len.contains(&token.len()) || !token.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  token.parse().ok()
}

// ─── Formatting ──────────────────────────────────────────────────────────────

/// Render `date` in the layout accepted by [`parse_date_in`].
pub fn format_date(date: NaiveDate, vocabulary: &Vocabulary) -> String {
  format!(
    "{}, {:02} {} {:04}",
    vocabulary.weekday_name(date.weekday()),
    date.day(),
    vocabulary.month_name(date.month()),
    date.year()
  )
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn english_date() {
    assert_eq!(parse_date("Mon, 02 September 2024").unwrap(), ymd(2024, 9, 2));
  }

  #[test]
  fn russian_genitive_and_nominative() {
    assert_eq!(parse_date("Пн, 02 сентября 2024").unwrap(), ymd(2024, 9, 2));
    assert_eq!(parse_date("пн, 2 Сентябрь 2024").unwrap(), ymd(2024, 9, 2));
    assert_eq!(parse_date("Чт, 29 февраля 2024").unwrap(), ymd(2024, 2, 29));
  }

  #[test]
  fn full_weekday_names_are_accepted() {
    assert_eq!(parse_date("Monday, 02 September 2024").unwrap(), ymd(2024, 9, 2));
    assert_eq!(parse_date("Понедельник, 02 сентября 2024").unwrap(), ymd(2024, 9, 2));
  }

  #[test]
  fn weekday_is_not_cross_checked() {
    // 2024-09-02 is a Monday.
    assert_eq!(parse_date("Fri, 02 September 2024").unwrap(), ymd(2024, 9, 2));
  }

  #[test]
  fn vocabularies_do_not_mix() {
    let err = parse_date("Mon, 02 сентября 2024").unwrap_err();
    assert!(matches!(err, Error::InvalidDate { reason: "unrecognised month", .. }));
    assert!(parse_date_in("Mon, 02 September 2024", &RUSSIAN).is_err());
  }

  #[test]
  fn errors_keep_the_raw_input() {
    for raw in [
      "",
      "02 September 2024",
      "Xyz, 02 September 2024",
      "Mon, 02 Septober 2024",
      "Mon, 31 September 2024",
      "Mon, two September 2024",
      "Mon, 02 September 24",
      "Mon, 02 September 2024 extra",
    ] {
      let Error::InvalidDate { value, .. } = parse_date(raw).unwrap_err() else {
        panic!("expected InvalidDate for {raw:?}")
      };
      assert_eq!(value, raw);
    }
  }

  #[test]
  fn format_then_parse_returns_the_same_date() {
    let mut date = ymd(2024, 1, 1);
    while date.year() == 2024 {
      for vocabulary in VOCABULARIES {
        let text = format_date(date, vocabulary);
        assert_eq!(parse_date_in(&text, vocabulary).unwrap(), date, "{text}");
        assert_eq!(parse_date(&text).unwrap(), date, "{text}");
      }
      date = date.succ_opt().unwrap();
    }
  }

  #[test]
  fn format_uses_display_forms() {
    assert_eq!(format_date(ymd(2024, 9, 2), &ENGLISH), "Mon, 02 September 2024");
    assert_eq!(format_date(ymd(2024, 9, 2), &RUSSIAN), "Пн, 02 сентября 2024");
  }
}
