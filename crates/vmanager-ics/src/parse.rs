//! iCalendar reader.
//!
//! Pipeline:
//!   raw &str
//!     └─ content_lines()          → Vec<String>
//!          └─ CalendarBuilder::feed() per line
//!               └─ tokenize() + classify() → field updates on the open frame
//!
//! Open blocks live on an explicit stack. The top of the stack decides how a
//! line is read; an empty stack means we are between components.

use chrono::NaiveDateTime;
use tracing::{debug, trace, warn};
use vmanager_core::{
  calendar::{Alarm, Calendar, Event, RecurrenceRule, Todo},
  line::{content_lines, param_name, param_value, tokenize},
  time::parse_timestamp,
};

use crate::{
  error::Result,
  property::{Component, Property, RulePart, classify},
};

// ─── Frames ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
enum Frame {
  Event(Event),
  Todo(Todo),
  Alarm(Alarm),
}

impl Frame {
  fn name(&self) -> &'static str {
    match self {
      Frame::Event(_) => "VEVENT",
      Frame::Todo(_) => "VTODO",
      Frame::Alarm(_) => "VALARM",
    }
  }

  /// Terminators are matched against the raw line, case-sensitively.
  fn is_closed_by(&self, line: &str) -> bool {
    match self {
      Frame::Event(_) => line == "END:VEVENT",
      Frame::Todo(_) => line == "END:VTODO",
      Frame::Alarm(_) => line == "END:VALARM" || line == "END:ALARM",
    }
  }
}

// ─── Field helpers ───────────────────────────────────────────────────────────

/// Field 1, when the line has one.
fn value(fields: &[String]) -> Option<&str> {
  fields.get(1).map(String::as_str)
}

fn set_text(target: &mut String, fields: &[String]) {
  if let Some(v) = value(fields) {
    *target = v.to_string();
  }
}

/// A `DTSTART`/`DTEND` line.
///
/// `KEY:ts` carries only the timestamp. With parameters, a `NAME=VALUE`
/// first parameter gives the zone label and the last field the timestamp.
fn dated(fields: &[String]) -> Result<Option<(NaiveDateTime, Option<String>)>> {
  match fields {
    [] | [_] => Ok(None),
    [property, ts] => Ok(Some((parse_timestamp(property, ts)?, None))),
    [property, param, .., ts] => {
      let zone = param_value(param).map(str::to_string);
      Ok(Some((parse_timestamp(property, ts)?, zone)))
    }
  }
}

fn set_dated(
  at: &mut NaiveDateTime,
  zone: &mut String,
  fields: &[String],
) -> Result<()> {
  if let Some((t, z)) = dated(fields)? {
    *at = t;
    if let Some(z) = z {
      *zone = z;
    }
  }
  Ok(())
}

fn set_stamp(at: &mut NaiveDateTime, fields: &[String]) -> Result<()> {
  if let Some(v) = value(fields) {
    *at = parse_timestamp(&fields[0], v)?;
  }
  Ok(())
}

/// `RRULE:FREQ=…;UNTIL=…`; parts other than `FREQ` and `UNTIL` are dropped.
fn rule(fields: &[String]) -> RecurrenceRule {
  let mut rule = RecurrenceRule::default();
  for part in &fields[1..] {
    let v = param_value(part).unwrap_or_default();
    match classify::<RulePart>(param_name(part)) {
      RulePart::Freq => rule.frequency = v.to_string(),
      RulePart::Until => rule.until = v.to_string(),
      RulePart::Unrecognized(name) => trace!(%name, "ignoring RRULE part"),
    }
  }
  rule
}

// ─── Per-frame field updates ─────────────────────────────────────────────────

fn update_event(
  event: &mut Event,
  property: Property,
  fields: &[String],
) -> Result<()> {
  match property {
    Property::Uid => set_text(&mut event.uid, fields),
    Property::Dtstamp => set_stamp(&mut event.created_at, fields)?,
    Property::Dtstart => {
      set_dated(&mut event.start_at, &mut event.start_zone, fields)?
    }
    Property::Dtend => {
      set_dated(&mut event.end_at, &mut event.end_zone, fields)?
    }
    Property::Summary => set_text(&mut event.summary, fields),
    Property::Description => set_text(&mut event.description, fields),
    Property::Location => set_text(&mut event.location, fields),
    Property::Status => set_text(&mut event.status, fields),
    Property::Rrule if fields.len() > 1 => event.rules.push(rule(fields)),
    other => trace!(key = %fields[0], ?other, "ignoring key in VEVENT"),
  }
  Ok(())
}

fn update_todo(
  todo: &mut Todo,
  property: Property,
  fields: &[String],
) -> Result<()> {
  match property {
    Property::Uid => set_text(&mut todo.uid, fields),
    Property::Dtstamp => set_stamp(&mut todo.created_at, fields)?,
    Property::Dtstart => {
      set_dated(&mut todo.start_at, &mut todo.start_zone, fields)?
    }
    Property::Summary => set_text(&mut todo.summary, fields),
    Property::Description => set_text(&mut todo.description, fields),
    Property::Duration => set_text(&mut todo.duration, fields),
    Property::Status => set_text(&mut todo.status, fields),
    other => trace!(key = %fields[0], ?other, "ignoring key in VTODO"),
  }
  Ok(())
}

fn update_alarm(alarm: &mut Alarm, property: Property, fields: &[String]) {
  match property {
    Property::Trigger => set_text(&mut alarm.trigger, fields),
    Property::Description => set_text(&mut alarm.description, fields),
    Property::Action => set_text(&mut alarm.action, fields),
    other => trace!(key = %fields[0], ?other, "ignoring key in VALARM"),
  }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Line-at-a-time calendar builder.
///
/// ```
/// use vmanager_ics::CalendarBuilder;
///
/// let mut builder = CalendarBuilder::new();
/// for line in ["BEGIN:VEVENT", "UID:e1", "END:VEVENT"] {
///   builder.feed(line).unwrap();
/// }
/// let calendar = builder.finish();
/// assert_eq!(calendar.events[0].uid, "e1");
/// ```
#[derive(Debug, Default)]
pub struct CalendarBuilder {
  calendar: Calendar,
  stack:    Vec<Frame>,
}

impl CalendarBuilder {
  pub fn new() -> Self { Self::default() }

  /// Consume one logical line.
  ///
  /// Fails only when a timestamp cannot be parsed; the builder should then
  /// be discarded.
  pub fn feed(&mut self, line: &str) -> Result<()> {
    let Some(frame) = self.stack.last_mut() else {
      self.feed_top(line);
      return Ok(());
    };

    if frame.is_closed_by(line) {
      if let Some(done) = self.stack.pop() {
        self.attach(done);
      }
      return Ok(());
    }

    let fields = tokenize(line);
    let property = classify::<Property>(&fields[0]);

    if property == Property::Begin {
      let nested = value(&fields).map(classify::<Component>);
      let in_component = matches!(frame, Frame::Event(_) | Frame::Todo(_));
      if in_component && nested == Some(Component::Valarm) {
        self.stack.push(Frame::Alarm(Alarm::default()));
      } else {
        debug!(parent = frame.name(), ?nested, "skipping nested block");
      }
      return Ok(());
    }

    match frame {
      Frame::Event(event) => update_event(event, property, &fields),
      Frame::Todo(todo) => update_todo(todo, property, &fields),
      Frame::Alarm(alarm) => {
        update_alarm(alarm, property, &fields);
        Ok(())
      }
    }
  }

  /// Between components only `BEGIN` lines matter.
  fn feed_top(&mut self, line: &str) {
    let fields = tokenize(line);
    if classify::<Property>(&fields[0]) != Property::Begin {
      trace!(line, "skipping line outside any component");
      return;
    }

    match value(&fields).map(classify::<Component>) {
      Some(Component::Vcalendar) => {}
      Some(Component::Vevent) => self.stack.push(Frame::Event(Event::new())),
      Some(Component::Vtodo) => self.stack.push(Frame::Todo(Todo::new())),
      other => debug!(block = ?other, "skipping top-level block"),
    }
  }

  /// Hand a finished frame to its parent.
  fn attach(&mut self, frame: Frame) {
    match frame {
      Frame::Event(event) => self.calendar.events.push(event),
      Frame::Todo(todo) => self.calendar.todos.push(todo),
      Frame::Alarm(alarm) => match self.stack.last_mut() {
        Some(Frame::Event(event)) => event.alarms.push(alarm),
        Some(Frame::Todo(todo)) => todo.alarms.push(alarm),
        _ => warn!("dropping VALARM with no enclosing component"),
      },
    }
  }

  /// Close every block still open, innermost first, and return the result.
  pub fn finish(mut self) -> Calendar {
    while let Some(frame) = self.stack.pop() {
      warn!(block = frame.name(), "unterminated block at end of input");
      self.attach(frame);
    }
    self.calendar
  }
}

/// Build a calendar from already-unfolded lines.
pub fn build<I>(lines: I) -> Result<Calendar>
where
  I: IntoIterator,
  I::Item: AsRef<str>,
{
  let mut builder = CalendarBuilder::new();
  for line in lines {
    builder.feed(line.as_ref())?;
  }
  Ok(builder.finish())
}

/// Parse a whole `.ics` document.
pub fn parse(input: &str) -> Result<Calendar> { build(content_lines(input)) }
