//! Calendar HTML microformat export and import.
//!
//! Values are trimmed on import.

use vmanager_core::{
  calendar::{Calendar, Event, Todo},
  export::CALENDAR_HTML_MARKER,
  html::{HtmlPage, MicroformatBlock, MicroformatWriter, scan},
  time::{format_human, format_timestamp, parse_timestamp},
};

use crate::error::Result;

const VEVENT: &str = "vevent";
const VTODO: &str = "vtodo";

fn abbr_time(
  w: &mut MicroformatWriter,
  class: &str,
  at: &chrono::NaiveDateTime,
) -> vmanager_core::Result<()> {
  w.abbr(class, &format_timestamp(at), &format_human(at))
}

/// Render `calendar` as HTML microformats.
pub fn to_html(calendar: &Calendar, page: &HtmlPage) -> Result<String> {
  let mut w = MicroformatWriter::new(CALENDAR_HTML_MARKER, page)?;

  for e in &calendar.events {
    w.open(VEVENT)?;
    w.div("summary", &e.summary)?;
    abbr_time(&mut w, "dtstart", &e.start_at)?;
    abbr_time(&mut w, "dtend", &e.end_at)?;
    w.div("location", &e.location)?;
    w.div("status", &e.status)?;
    w.close()?;
  }

  for t in &calendar.todos {
    w.open(VTODO)?;
    w.div("summary", &t.summary)?;
    abbr_time(&mut w, "dtstart", &t.start_at)?;
    w.div("duration", &t.duration)?;
    w.div("status", &t.status)?;
    w.close()?;
  }

  Ok(w.finish()?)
}

fn copy(block: &MicroformatBlock, class: &str, target: &mut String) {
  if let Some(v) = block.get(class) {
    *target = v.to_string();
  }
}

fn copy_time(
  block: &MicroformatBlock,
  class: &str,
  target: &mut chrono::NaiveDateTime,
) -> Result<()> {
  if let Some(v) = block.get(class) {
    *target = parse_timestamp(class, v)?;
  }
  Ok(())
}

/// Rebuild a calendar from an HTML export.
///
/// Any markup is accepted as long as the blocks carry the `vevent` /
/// `vtodo` classes.
pub fn from_html(input: &str) -> Result<Calendar> {
  let mut calendar = Calendar::new();

  for block in scan(input, &[VEVENT, VTODO])? {
    if block.class == VEVENT {
      let mut e = Event::new();
      copy(&block, "summary", &mut e.summary);
      copy_time(&block, "dtstart", &mut e.start_at)?;
      copy_time(&block, "dtend", &mut e.end_at)?;
      copy(&block, "location", &mut e.location);
      copy(&block, "status", &mut e.status);
      calendar.events.push(e);
    } else {
      let mut t = Todo::new();
      copy(&block, "summary", &mut t.summary);
      copy_time(&block, "dtstart", &mut t.start_at)?;
      copy(&block, "duration", &mut t.duration);
      copy(&block, "status", &mut t.status);
      calendar.todos.push(t);
    }
  }

  Ok(calendar)
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, NaiveDateTime};

  use super::*;
  use crate::error::Error;

  fn at(h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 12, 1)
      .unwrap()
      .and_hms_opt(h, 0, 0)
      .unwrap()
  }

  fn sample() -> Calendar {
    let mut cal = Calendar::new();
    cal.events.push(Event {
      summary: "Tom & Jerry <live>".to_string(),
      start_at: at(10),
      end_at: at(11),
      location: "Room \"A\"".to_string(),
      status: "CONFIRMED".to_string(),
      ..Event::new()
    });
    cal.todos.push(Todo {
      summary: "Buy milk".to_string(),
      start_at: at(8),
      duration: "PT15M".to_string(),
      status: "NEEDS-ACTION".to_string(),
      ..Todo::new()
    });
    cal
  }

  #[test]
  fn export_layout() {
    let out = to_html(&sample(), &HtmlPage::fragment()).unwrap();
    assert!(out.starts_with("<!--vcalendar_export-->"));
    assert!(out.contains(
      r#"<abbr class="dtstart" title="20221201T100000">2022-12-01 10:00:00</abbr>"#
    ));
    assert!(out.contains(r#"<div class="duration">PT15M</div>"#));
    assert!(out.contains(r#"<div class="status">NEEDS-ACTION</div>"#));
    assert!(out.contains("Tom &amp; Jerry &lt;live&gt;"));
  }

  #[test]
  fn round_trip_keeps_microformat_fields() {
    for page in [HtmlPage::fragment(), HtmlPage::complete("en", "Agenda")] {
      let original = sample();
      let back = from_html(&to_html(&original, &page).unwrap()).unwrap();

      let (e, want) = (&back.events[0], &original.events[0]);
      assert_eq!(e.summary, want.summary);
      assert_eq!(e.start_at, want.start_at);
      assert_eq!(e.end_at, want.end_at);
      assert_eq!(e.location, want.location);
      assert_eq!(e.status, want.status);

      let (t, want) = (&back.todos[0], &original.todos[0]);
      assert_eq!(t.summary, want.summary);
      assert_eq!(t.start_at, want.start_at);
      assert_eq!(t.duration, want.duration);
      assert_eq!(t.status, want.status);
    }
  }

  #[test]
  fn human_text_is_used_without_title() {
    let html = r#"<div class="vevent"><span class="dtstart">2022-12-01 09:00:00</span></div>"#;
    let cal = from_html(html).unwrap();
    assert_eq!(cal.events[0].start_at, at(9));
  }

  #[test]
  fn bad_time_is_reported() {
    let html = r#"<div class="vtodo"><abbr class="dtstart" title="soon">soon</abbr></div>"#;
    assert!(matches!(from_html(html), Err(Error::Core(_))));
  }
}
