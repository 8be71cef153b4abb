//! Calendar CSV export and import.
//!
//! One row per event, then one per todo, under
//! `type,timestamp,uid,summary,dtstart,status`. The format is lossy: zones,
//! end times, locations, rules and alarms are not carried.

use chrono::NaiveDateTime;
use tracing::trace;
use vmanager_core::{
  calendar::{Calendar, Event, Todo},
  export::CALENDAR_CSV_HEADER,
  time::{format_timestamp, parse_timestamp},
};

use crate::error::{Error, Result};

const EVENT_TYPE: &str = "vevent";
const TODO_TYPE: &str = "vtodo";

fn write_row<W: std::io::Write>(
  writer: &mut csv::Writer<W>,
  kind: &str,
  created_at: &NaiveDateTime,
  uid: &str,
  summary: &str,
  start_at: &NaiveDateTime,
  status: &str,
) -> Result<()> {
  let created_at = format_timestamp(created_at);
  let start_at = format_timestamp(start_at);
  writer.write_record([
    kind,
    created_at.as_str(),
    uid,
    summary,
    start_at.as_str(),
    status,
  ])?;
  Ok(())
}

/// Render `calendar` as CSV, `\n`-terminated.
pub fn to_csv(calendar: &Calendar) -> Result<String> {
  let mut writer = csv::WriterBuilder::new()
    .terminator(csv::Terminator::Any(b'\n'))
    .from_writer(Vec::new());

  writer.write_record(CALENDAR_CSV_HEADER)?;
  for e in &calendar.events {
    write_row(
      &mut writer,
      EVENT_TYPE,
      &e.created_at,
      &e.uid,
      &e.summary,
      &e.start_at,
      &e.status,
    )?;
  }
  for t in &calendar.todos {
    write_row(
      &mut writer,
      TODO_TYPE,
      &t.created_at,
      &t.uid,
      &t.summary,
      &t.start_at,
      &t.status,
    )?;
  }

  let bytes = writer
    .into_inner()
    .map_err(|e| csv::Error::from(e.into_error()))?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Rebuild a calendar from a CSV export.
///
/// Rows whose first column is neither `vevent` nor `vtodo` (the header
/// included) are skipped. An event's end is taken from the `dtstart`
/// column, since the export has no end column.
pub fn from_csv(input: &str) -> Result<Calendar> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .from_reader(input.as_bytes());

  let mut calendar = Calendar::new();
  for (index, record) in reader.records().enumerate() {
    let record = record?;
    let kind = record.get(0).unwrap_or_default();
    if kind != EVENT_TYPE && kind != TODO_TYPE {
      trace!(kind, "skipping CSV row");
      continue;
    }

    let columns: Vec<&str> = record.iter().collect();
    let [_, stamp, uid, summary, start, status, ..] = columns[..] else {
      return Err(Error::MalformedRow {
        row:    index as u64 + 1,
        reason: format!("expected 6 columns, found {}", record.len()),
      });
    };

    let created_at = parse_timestamp(CALENDAR_CSV_HEADER[1], stamp)?;
    let start_at = parse_timestamp(CALENDAR_CSV_HEADER[4], start)?;

    if kind == EVENT_TYPE {
      calendar.events.push(Event {
        uid: uid.to_string(),
        created_at,
        summary: summary.to_string(),
        start_at,
        end_at: start_at,
        status: status.to_string(),
        ..Event::new()
      });
    } else {
      calendar.todos.push(Todo {
        uid: uid.to_string(),
        created_at,
        summary: summary.to_string(),
        start_at,
        status: status.to_string(),
        ..Todo::new()
      });
    }
  }

  Ok(calendar)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use vmanager_core::Error as CoreError;

  use super::*;

  fn at(h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 12, 1)
      .unwrap()
      .and_hms_opt(h, 0, 0)
      .unwrap()
  }

  fn sample() -> Calendar {
    let mut cal = Calendar::new();
    cal.events.push(Event {
      uid: "e1".to_string(),
      created_at: at(10),
      summary: "Meet".to_string(),
      start_at: at(10),
      end_at: at(11),
      status: "CONFIRMED".to_string(),
      ..Event::new()
    });
    cal.todos.push(Todo {
      uid: "t1".to_string(),
      created_at: at(8),
      summary: "Lunch, then coffee".to_string(),
      start_at: at(12),
      ..Todo::new()
    });
    cal
  }

  #[test]
  fn export_rows() {
    let out = to_csv(&sample()).unwrap();
    let rows: Vec<_> = out.lines().collect();
    assert_eq!(rows[0], "type,timestamp,uid,summary,dtstart,status");
    assert_eq!(
      rows[1],
      "vevent,20221201T100000,e1,Meet,20221201T100000,CONFIRMED"
    );
    assert_eq!(
      rows[2],
      "vtodo,20221201T080000,t1,\"Lunch, then coffee\",20221201T120000,"
    );
    assert!(!out.contains('\r'));
  }

  #[test]
  fn import_collapses_event_end_onto_start() {
    let cal = from_csv(&to_csv(&sample()).unwrap()).unwrap();
    let e = &cal.events[0];
    assert_eq!(e.uid, "e1");
    assert_eq!(e.summary, "Meet");
    assert_eq!(e.status, "CONFIRMED");
    assert_eq!(e.start_at, at(10));
    assert_eq!(e.end_at, e.start_at);

    let t = &cal.todos[0];
    assert_eq!(t.summary, "Lunch, then coffee");
    assert_eq!(t.start_at, at(12));
    assert_eq!(t.created_at, at(8));
  }

  #[test]
  fn short_row_is_malformed() {
    let input = "type,timestamp,uid,summary,dtstart,status\nvevent,20221201T100000,e1\n";
    let Err(Error::MalformedRow { row, .. }) = from_csv(input) else {
      panic!("expected MalformedRow")
    };
    assert_eq!(row, 2);
  }

  #[test]
  fn foreign_rows_are_skipped() {
    let input = "something else\nvjournal,a,b,c,d,e\n";
    assert!(from_csv(input).unwrap().is_empty());
  }

  #[test]
  fn bad_timestamp_is_reported() {
    let input = "vtodo,yesterday,t1,x,20221201T100000,\n";
    let Err(Error::Core(CoreError::MalformedTimestamp { property, .. })) =
      from_csv(input)
    else {
      panic!("expected MalformedTimestamp")
    };
    assert_eq!(property, "timestamp");
  }
}
