//! Timestamp codec shared by every format.
//!
//! Timestamps are naive: a `TZID` label travels next to them as a plain
//! string and is never applied.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{Error, Result};

/// The basic ISO-8601 form used in every file vManager writes.
const BASIC: &str = "%Y%m%dT%H%M%S";

const DATE_TIME_FORMATS: [&str; 3] =
  [BASIC, "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const DATE_FORMATS: [&str; 2] = ["%Y%m%d", "%Y-%m-%d"];

/// Current local time, truncated to whole seconds so it survives a
/// serialize/parse round trip unchanged.
pub fn now() -> NaiveDateTime { truncate(Local::now().naive_local()) }

fn truncate(t: NaiveDateTime) -> NaiveDateTime {
  t.with_nanosecond(0).unwrap_or(t)
}

/// Parse an ISO-8601 timestamp as found in `DTSTART`, `DTEND` or `DTSTAMP`.
///
/// Accepts basic and extended date-times (optionally `Z`-suffixed) and bare
/// dates, which are read as midnight. There is no other fallback.
pub fn parse_timestamp(property: &str, value: &str) -> Result<NaiveDateTime> {
  let trimmed = value.trim();
  let v = trimmed
    .strip_suffix('Z')
    .or_else(|| trimmed.strip_suffix('z'))
    .unwrap_or(trimmed);

  for fmt in DATE_TIME_FORMATS {
    if let Ok(t) = NaiveDateTime::parse_from_str(v, fmt) {
      return Ok(truncate(t));
    }
  }
  for fmt in DATE_FORMATS {
    if let Ok(d) = NaiveDate::parse_from_str(v, fmt)
      && let Some(t) = d.and_hms_opt(0, 0, 0)
    {
      return Ok(t);
    }
  }

  Err(Error::MalformedTimestamp {
    property: property.to_string(),
    value:    value.to_string(),
  })
}

/// Format as `YYYYMMDDTHHMMSS`.
pub fn format_timestamp(t: &NaiveDateTime) -> String {
  t.format(BASIC).to_string()
}

/// Format for people, e.g. `2022-12-01 10:00:00`.
pub fn format_human(t: &NaiveDateTime) -> String {
  t.format("%Y-%m-%d %H:%M:%S").to_string()
}
