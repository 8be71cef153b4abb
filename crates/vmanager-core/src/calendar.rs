//! Calendar entities: events, todos, and the alarms and recurrence rules
//! hanging off them.
//!
//! Every entity owns its collections outright; nothing is shared between
//! two events or two calendars.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time;

// ─── Calendar ────────────────────────────────────────────────────────────────

/// An ordered list of events followed by an ordered list of todos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
  pub events: Vec<Event>,
  pub todos:  Vec<Todo>,
}

impl Calendar {
  pub fn new() -> Self { Self::default() }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty() && self.todos.is_empty()
  }
}

// ─── Components ──────────────────────────────────────────────────────────────

/// A `VEVENT` block.
///
/// `start_at <= end_at` is not enforced; inconsistent input is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub uid:         String,
  /// `DTSTAMP`.
  pub created_at:  NaiveDateTime,
  pub summary:     String,
  pub start_at:    NaiveDateTime,
  /// `TZID` label of `DTSTART`; carried through, never interpreted.
  pub start_zone:  String,
  pub end_at:      NaiveDateTime,
  pub end_zone:    String,
  pub location:    String,
  pub description: String,
  pub status:      String,
  pub alarms:      Vec<Alarm>,
  pub rules:       Vec<RecurrenceRule>,
}

impl Event {
  /// A blank event whose timestamps all read "now".
  pub fn new() -> Self {
    let now = time::now();
    Self {
      uid:         String::new(),
      created_at:  now,
      summary:     String::new(),
      start_at:    now,
      start_zone:  String::new(),
      end_at:      now,
      end_zone:    String::new(),
      location:    String::new(),
      description: String::new(),
      status:      String::new(),
      alarms:      Vec::new(),
      rules:       Vec::new(),
    }
  }
}

impl Default for Event {
  fn default() -> Self { Self::new() }
}

/// A `VTODO` block. Shares the identity fields of [`Event`] but has an
/// opaque duration instead of an end time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
  pub uid:         String,
  pub created_at:  NaiveDateTime,
  pub summary:     String,
  pub start_at:    NaiveDateTime,
  pub start_zone:  String,
  pub description: String,
  /// Raw `DURATION` value (e.g. `PT1H`); never parsed into a time span.
  pub duration:    String,
  pub status:      String,
  pub alarms:      Vec<Alarm>,
}

impl Todo {
  /// A blank todo whose timestamps all read "now".
  pub fn new() -> Self {
    let now = time::now();
    Self {
      uid:         String::new(),
      created_at:  now,
      summary:     String::new(),
      start_at:    now,
      start_zone:  String::new(),
      description: String::new(),
      duration:    String::new(),
      status:      String::new(),
      alarms:      Vec::new(),
    }
  }
}

impl Default for Todo {
  fn default() -> Self { Self::new() }
}

// ─── Nested blocks ───────────────────────────────────────────────────────────

/// A `VALARM` block, owned by exactly one event or todo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
  /// Raw trigger offset, e.g. `-PT10M`.
  pub trigger:     String,
  pub description: String,
  /// e.g. `DISPLAY` or `AUDIO`.
  pub action:      String,
}

/// The `FREQ` / `UNTIL` subset of an `RRULE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
  /// `DAILY`, `WEEKLY`, …
  pub frequency: String,
  /// Opaque end date; empty means the rule never ends.
  pub until:     String,
}

impl RecurrenceRule {
  pub fn new(frequency: impl Into<String>, until: impl Into<String>) -> Self {
    Self {
      frequency: frequency.into(),
      until:     until.into(),
    }
  }

  pub fn is_bounded(&self) -> bool { !self.until.is_empty() }
}
