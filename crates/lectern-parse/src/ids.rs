//! Lecture numbers: `"<absolute>"` or `"<absolute> (<relative>)"`.

use crate::error::{Error, Result};

fn invalid(value: &str, reason: &'static str) -> Error {
  Error::InvalidIds { value: value.to_owned(), reason }
}

fn number(value: &str, part: &str) -> Result<u32> {
  if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
    return Err(invalid(value, "expected a non-negative integer"));
  }
  part.parse().map_err(|_| invalid(value, "number out of range"))
}

/// Parse a lecture-number token into `(absolute, relative)`.
///
/// Without a parenthesised part the relative number equals the absolute one.
pub fn parse_ids(token: &str) -> Result<(u32, u32)> {
  let trimmed = token.trim();
  if trimmed.is_empty() {
    return Err(invalid(token, "empty"));
  }

  let Some((absolute, rest)) = trimmed.split_once('(') else {
    if trimmed.contains(')') {
      return Err(invalid(token, "unbalanced parentheses"));
    }
    let absolute = number(token, trimmed)?;
    return Ok((absolute, absolute));
  };

  let (relative, trailing) = rest
    .split_once(')')
    .ok_or_else(|| invalid(token, "unbalanced parentheses"))?;
  if relative.contains('(') || trailing.contains(')') {
    return Err(invalid(token, "unbalanced parentheses"));
  }
  if !trailing.trim().is_empty() {
    return Err(invalid(token, "unexpected text after `)`"));
  }

  Ok((number(token, absolute.trim())?, number(token, relative.trim())?))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_number_repeats() {
    assert_eq!(parse_ids("5").unwrap(), (5, 5));
    assert_eq!(parse_ids("  12 ").unwrap(), (12, 12));
  }

  #[test]
  fn parenthesised_relative() {
    assert_eq!(parse_ids("5 (3)").unwrap(), (5, 3));
    assert_eq!(parse_ids("5(3)").unwrap(), (5, 3));
    assert_eq!(parse_ids(" 2 ( 4 ) ").unwrap(), (2, 4));
  }

  #[test]
  fn rejects_malformed_tokens() {
    for raw in ["", "   ", "5 (x)", "x", "5 (3", "5 3)", "(3)", "5 ()", "5 (3) 4", "5 ((3))", "-1", "5 3"] {
      let err = parse_ids(raw).unwrap_err();
      let Error::InvalidIds { value, .. } = err else {
        panic!("expected InvalidIds for {raw:?}, got {err:?}")
      };
      assert_eq!(value, raw);
    }
  }

  #[test]
  fn overflow_is_an_error() {
    assert!(matches!(
      parse_ids("99999999999").unwrap_err(),
      Error::InvalidIds { reason: "number out of range", .. }
    ));
  }
}
