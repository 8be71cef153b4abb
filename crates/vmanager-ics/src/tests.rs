//! Cross-module tests: native round trips and file operations.

use chrono::{NaiveDate, NaiveDateTime};
use vmanager_core::{
  calendar::{Alarm, Calendar, Event, RecurrenceRule, Todo},
  html::HtmlPage,
};

use crate::{Error, file, parse, serialize};

fn at(d: u32, h: u32, mi: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2022, 12, d)
    .unwrap()
    .and_hms_opt(h, mi, 0)
    .unwrap()
}

fn meet() -> Event {
  Event {
    uid: "e1".to_string(),
    created_at: at(1, 9, 0),
    summary: "Meet".to_string(),
    start_at: at(1, 10, 0),
    end_at: at(1, 11, 0),
    status: "CONFIRMED".to_string(),
    ..Event::new()
  }
}

fn full_calendar() -> Calendar {
  let mut event = Event {
    start_zone: "America/New_York".to_string(),
    end_zone: "America/New_York".to_string(),
    location: "Room 1".to_string(),
    description: "Quarterly review of every open item on the board, \
                  with notes long enough to need folding"
      .to_string(),
    ..meet()
  };
  event.rules.push(RecurrenceRule::new("WEEKLY", "20230101T000000Z"));
  event.alarms.push(Alarm {
    trigger:     "-PT10M".to_string(),
    description: "Reminder".to_string(),
    action:      "DISPLAY".to_string(),
  });

  let mut todo = Todo {
    uid: "t1".to_string(),
    created_at: at(2, 8, 0),
    summary: "Écrire le compte rendu".to_string(),
    start_at: at(2, 9, 30),
    description: "draft".to_string(),
    duration: "PT1H".to_string(),
    status: "NEEDS-ACTION".to_string(),
    ..Todo::new()
  };
  todo.alarms.push(Alarm {
    trigger: "-PT5M".to_string(),
    action: "AUDIO".to_string(),
    ..Alarm::default()
  });

  Calendar {
    events: vec![event, meet()],
    todos:  vec![todo],
  }
}

// ─── Native round trip ───────────────────────────────────────────────────────

#[test]
fn simple_event_round_trip() {
  let mut cal = Calendar::new();
  cal.events.push(meet());
  let back = parse(&serialize(&cal)).unwrap();
  assert_eq!(back, cal);
}

#[test]
fn full_round_trip() {
  let cal = full_calendar();
  let text = serialize(&cal);
  for physical in text.split("\r\n") {
    assert!(physical.len() <= 75, "unfolded line: {physical:?}");
  }
  assert_eq!(parse(&text).unwrap(), cal);
}

#[test]
fn serialize_is_stable() {
  let text = serialize(&full_calendar());
  assert_eq!(serialize(&parse(&text).unwrap()), text);
}

// ─── Files ───────────────────────────────────────────────────────────────────

#[test]
fn save_and_read() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("agenda.ics");
  let cal = full_calendar();

  file::save(&cal, &path).unwrap();
  assert_eq!(file::read(&path).unwrap(), cal);
}

#[test]
fn csv_export_imports_back() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("agenda.csv");
  file::export_csv(&full_calendar(), &path).unwrap();

  let back = file::import_exported(&path).unwrap();
  assert_eq!(back.events.len(), 2);
  assert_eq!(back.todos.len(), 1);
  assert_eq!(back.events[1].uid, "e1");
  assert_eq!(back.events[1].end_at, back.events[1].start_at);
  assert_eq!(back.todos[0].summary, "Écrire le compte rendu");
}

#[test]
fn html_export_imports_back() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("agenda.html");
  let page = HtmlPage::complete("fr", "Agenda");
  file::export_html(&full_calendar(), &path, &page).unwrap();

  let back = file::import_exported(&path).unwrap();
  assert_eq!(back.events[0].location, "Room 1");
  assert_eq!(back.events[0].end_at, at(1, 11, 0));
  assert_eq!(back.todos[0].duration, "PT1H");
}

#[test]
fn native_file_is_not_an_export() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("agenda.ics");
  file::save(&full_calendar(), &path).unwrap();

  let Err(Error::UnrecognizedExport(p)) = file::import_exported(&path) else {
    panic!("expected UnrecognizedExport")
  };
  assert_eq!(p, path);
}

#[test]
fn missing_file_names_the_path() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("absent.ics");
  let Err(Error::Io { path: p, .. }) = file::read(&path) else {
    panic!("expected Io")
  };
  assert_eq!(p, path);
}
