//! Content-line helpers shared by the iCalendar and vCard builders.
//!
//! Pipeline:
//!   raw &str
//!     └─ content_lines()  → Vec<String>   (unfolded, CR stripped)
//!          └─ tokenize()  → Vec<String>   (key, params…, value)

// ─── Tokenizer ───────────────────────────────────────────────────────────────

/// Split one logical line into fields.
///
/// Every `;` or `:` opens a new field; all other characters go to the
/// current one. There is no escaping, so a literal `;` or `:` inside a value
/// cannot be represented. The result always has at least one field.
///
/// ```
/// use vmanager_core::line::tokenize;
///
/// assert_eq!(
///   tokenize("DTSTART;TZID=X:20220101T000000"),
///   ["DTSTART", "TZID=X", "20220101T000000"],
/// );
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
  let mut fields = vec![String::new()];
  for c in line.chars() {
    match c {
      ';' | ':' => fields.push(String::new()),
      _ => {
        if let Some(current) = fields.last_mut() {
          current.push(c);
        }
      }
    }
  }
  fields
}

/// The value half of a `NAME=VALUE` parameter field.
pub fn param_value(field: &str) -> Option<&str> {
  field.split_once('=').map(|(_, value)| value)
}

/// The name half of a `NAME=VALUE` parameter field (the whole field when
/// there is no `=`).
pub fn param_name(field: &str) -> &str {
  field.split_once('=').map_or(field, |(name, _)| name)
}

// ─── Folding ─────────────────────────────────────────────────────────────────

/// Octets per physical line, continuation space included.
const FOLD_WIDTH: usize = 75;

/// Split a document into logical lines.
///
/// CRLF and bare LF both end a line. A physical line opening with a space or
/// tab continues the previous one. Blank lines are dropped.
pub fn content_lines(input: &str) -> Vec<String> {
  let mut lines: Vec<String> = Vec::new();
  for line in input.split('\n').map(|raw| raw.strip_suffix('\r').unwrap_or(raw)) {
    match line.strip_prefix([' ', '\t']) {
      Some(rest) => {
        // an orphan continuation has nothing to join
        if let Some(last) = lines.last_mut() {
          last.push_str(rest);
        }
      }
      None => lines.push(line.to_string()),
    }
  }
  lines.into_iter().filter(|line| !line.is_empty()).collect()
}

/// Render `s` as CRLF-terminated physical lines of at most 75 octets,
/// never splitting a character.
pub fn fold_line(s: &str) -> String {
  let mut out = String::with_capacity(s.len() + 3 * (s.len() / FOLD_WIDTH) + 2);
  let mut width = 0;
  for c in s.chars() {
    if width + c.len_utf8() > FOLD_WIDTH {
      out.push_str("\r\n ");
      width = 1;
    }
    out.push(c);
    width += c.len_utf8();
  }
  out.push_str("\r\n");
  out
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  #[test]
  fn empty_line_has_one_empty_field() {
    assert_eq!(tokenize(""), [""]);
  }

  #[test]
  fn params_are_separate_fields() {
    assert_eq!(
      tokenize("DTSTART;TZID=X:20220101T000000"),
      ["DTSTART", "TZID=X", "20220101T000000"]
    );
  }

  #[test]
  fn adjacent_delimiters_produce_empty_fields() {
    assert_eq!(tokenize("ADR:;;Main St"), ["ADR", "", "", "Main St"]);
    assert_eq!(tokenize("NOTE:"), ["NOTE", ""]);
  }

  #[test]
  fn param_halves() {
    assert_eq!(param_value("TZID=Europe/Paris"), Some("Europe/Paris"));
    assert_eq!(param_value("FREQ=DAILY=X"), Some("DAILY=X"));
    assert_eq!(param_value("PREF"), None);
    assert_eq!(param_name("TYPE=WORK"), "TYPE");
    assert_eq!(param_name("PREF"), "PREF");
  }

  #[test]
  fn content_lines_unfold_and_strip() {
    let input = "BEGIN:VEVENT\r\nSUMMARY:Long\r\n  meeting\r\n\r\nEND:VEVENT\n";
    assert_eq!(
      content_lines(input),
      ["BEGIN:VEVENT", "SUMMARY:Long meeting", "END:VEVENT"]
    );
  }

  #[test]
  fn short_line_is_not_folded() {
    assert_eq!(fold_line("UID:e1"), "UID:e1\r\n");
  }

  #[test]
  fn long_line_folds_and_unfolds() {
    let line = format!("DESCRIPTION:{}", "é".repeat(90));
    let folded = fold_line(&line);
    for physical in folded.split("\r\n").filter(|l| !l.is_empty()) {
      assert!(physical.len() <= 75, "too long: {physical:?}");
    }
    assert_eq!(content_lines(&folded), [line]);
  }

  #[test]
  fn fold_at_exact_width() {
    let line = "X".repeat(75);
    assert_eq!(fold_line(&line), format!("{line}\r\n"));
    let folded = fold_line(&"X".repeat(76));
    assert_eq!(folded, format!("{}\r\n X\r\n", "X".repeat(75)));
  }

  #[test]
  fn orphan_continuation_is_dropped() {
    assert_eq!(content_lines(" lost\nUID:e1\n\tA"), ["UID:e1A"]);
  }

  proptest! {
    #[test]
    fn line_without_delimiters_is_one_field(line in "[^;:]{0,80}") {
      let fields = tokenize(&line);
      prop_assert_eq!(fields.len(), 1);
      prop_assert_eq!(&fields[0], &line);
    }

    #[test]
    fn field_count_follows_delimiters(line in "[a-zA-Z0-9=;:/ -]{0,80}") {
      let delimiters = line.chars().filter(|c| *c == ';' || *c == ':').count();
      prop_assert_eq!(tokenize(&line).len(), delimiters + 1);
    }
  }
}
