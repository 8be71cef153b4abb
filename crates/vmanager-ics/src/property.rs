//! Closed vocabularies for iCalendar keys, block names and `RRULE` parts.
//!
//! Matching is ASCII case-insensitive. Anything outside the vocabulary
//! parses to `Unrecognized` instead of failing, so callers can skip it.

use strum::{Display, EnumString};

/// Field 0 of a content line.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Property {
  Begin,
  End,
  Uid,
  Dtstamp,
  Dtstart,
  Dtend,
  Summary,
  Description,
  Location,
  Status,
  Duration,
  Rrule,
  Trigger,
  Action,
  Version,
  Prodid,
  #[strum(default)]
  Unrecognized(String),
}

/// The value of a `BEGIN` line.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Component {
  Vcalendar,
  Vevent,
  Vtodo,
  /// Older producers write `BEGIN:ALARM`.
  #[strum(to_string = "VALARM", serialize = "ALARM")]
  Valarm,
  #[strum(default)]
  Unrecognized(String),
}

/// The `NAME` half of one `RRULE` part.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RulePart {
  Freq,
  Until,
  #[strum(default)]
  Unrecognized(String),
}

/// Infallible parse into one of the vocabularies above.
pub(crate) fn classify<T>(token: &str) -> T
where
  T: std::str::FromStr + From<String>,
{
  token.parse().unwrap_or_else(|_| T::from(token.to_string()))
}

impl From<String> for Property {
  fn from(token: String) -> Self { Self::Unrecognized(token) }
}

impl From<String> for Component {
  fn from(token: String) -> Self { Self::Unrecognized(token) }
}

impl From<String> for RulePart {
  fn from(token: String) -> Self { Self::Unrecognized(token) }
}
