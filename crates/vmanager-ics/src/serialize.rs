//! iCalendar writer.
//!
//! Produces CRLF line endings and folds at 75 octets. Empty optional fields
//! are left out; timestamps are always written.

use chrono::NaiveDateTime;
use vmanager_core::{
  calendar::{Alarm, Calendar, Event, RecurrenceRule, Todo},
  line::fold_line,
  time::format_timestamp,
};

use crate::property::{Component, Property, RulePart};

const PRODID: &str = "-//vManager//vManager Calendar//EN";

// ─── Line helpers ────────────────────────────────────────────────────────────

fn push(lines: &mut Vec<String>, property: Property, value: &str) {
  lines.push(fold_line(&format!("{property}:{value}")));
}

fn push_nonempty(lines: &mut Vec<String>, property: Property, value: &str) {
  if !value.is_empty() {
    push(lines, property, value);
  }
}

fn push_dated(
  lines: &mut Vec<String>,
  property: Property,
  at: &NaiveDateTime,
  zone: &str,
) {
  let ts = format_timestamp(at);
  let line = if zone.is_empty() {
    format!("{property}:{ts}")
  } else {
    format!("{property};TZID={zone}:{ts}")
  };
  lines.push(fold_line(&line));
}

fn push_block(
  lines: &mut Vec<String>,
  component: Component,
  body: impl FnOnce(&mut Vec<String>),
) {
  push(lines, Property::Begin, &component.to_string());
  body(lines);
  push(lines, Property::End, &component.to_string());
}

// ─── Encoders ────────────────────────────────────────────────────────────────

/// Native iCalendar encoding of one entity.
pub trait ToIcs {
  /// Append this entity's folded content lines.
  fn write_ics(&self, lines: &mut Vec<String>);

  fn to_ics(&self) -> String {
    let mut lines = Vec::new();
    self.write_ics(&mut lines);
    lines.concat()
  }
}

impl ToIcs for Calendar {
  fn write_ics(&self, lines: &mut Vec<String>) {
    push_block(lines, Component::Vcalendar, |lines| {
      push(lines, Property::Version, "2.0");
      push(lines, Property::Prodid, PRODID);
      for event in &self.events {
        event.write_ics(lines);
      }
      for todo in &self.todos {
        todo.write_ics(lines);
      }
    });
  }
}

impl ToIcs for Event {
  fn write_ics(&self, lines: &mut Vec<String>) {
    push_block(lines, Component::Vevent, |lines| {
      push_nonempty(lines, Property::Uid, &self.uid);
      push(lines, Property::Dtstamp, &format_timestamp(&self.created_at));
      push_nonempty(lines, Property::Summary, &self.summary);
      push_dated(lines, Property::Dtstart, &self.start_at, &self.start_zone);
      push_dated(lines, Property::Dtend, &self.end_at, &self.end_zone);
      push_nonempty(lines, Property::Location, &self.location);
      push_nonempty(lines, Property::Description, &self.description);
      push_nonempty(lines, Property::Status, &self.status);
      for rule in &self.rules {
        rule.write_ics(lines);
      }
      for alarm in &self.alarms {
        alarm.write_ics(lines);
      }
    });
  }
}

impl ToIcs for Todo {
  fn write_ics(&self, lines: &mut Vec<String>) {
    push_block(lines, Component::Vtodo, |lines| {
      push_nonempty(lines, Property::Uid, &self.uid);
      push(lines, Property::Dtstamp, &format_timestamp(&self.created_at));
      push_nonempty(lines, Property::Summary, &self.summary);
      push_dated(lines, Property::Dtstart, &self.start_at, &self.start_zone);
      push_nonempty(lines, Property::Description, &self.description);
      push_nonempty(lines, Property::Duration, &self.duration);
      push_nonempty(lines, Property::Status, &self.status);
      for alarm in &self.alarms {
        alarm.write_ics(lines);
      }
    });
  }
}

impl ToIcs for Alarm {
  fn write_ics(&self, lines: &mut Vec<String>) {
    push_block(lines, Component::Valarm, |lines| {
      push_nonempty(lines, Property::Trigger, &self.trigger);
      push_nonempty(lines, Property::Description, &self.description);
      push_nonempty(lines, Property::Action, &self.action);
    });
  }
}

impl ToIcs for RecurrenceRule {
  fn write_ics(&self, lines: &mut Vec<String>) {
    let mut value = format!("{}={}", RulePart::Freq, self.frequency);
    if self.is_bounded() {
      value.push_str(&format!(";{}={}", RulePart::Until, self.until));
    }
    push(lines, Property::Rrule, &value);
  }
}

/// Serialize a whole calendar as a `.ics` document.
pub fn serialize(calendar: &Calendar) -> String { calendar.to_ics() }
