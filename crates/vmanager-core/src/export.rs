//! Recognising files produced by the CSV and HTML exporters.

/// Header row of a calendar CSV export.
pub const CALENDAR_CSV_HEADER: [&str; 6] =
  ["type", "timestamp", "uid", "summary", "dtstart", "status"];

/// Header row of a contacts CSV export.
pub const CONTACTS_CSV_HEADER: [&str; 5] =
  ["full name", "emails", "phones", "addresses", "organization"];

/// Comment opening a calendar HTML export.
pub const CALENDAR_HTML_MARKER: &str = "vcalendar_export";

/// Comment opening a contacts HTML export.
pub const CONTACTS_HTML_MARKER: &str = "vcards_export";

/// What an exported file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
  CalendarCsv,
  ContactsCsv,
  CalendarHtml,
  ContactsHtml,
}

impl ExportKind {
  pub fn is_calendar(self) -> bool {
    matches!(self, Self::CalendarCsv | Self::CalendarHtml)
  }

  pub fn is_html(self) -> bool {
    matches!(self, Self::CalendarHtml | Self::ContactsHtml)
  }
}

/// Decide what an exported file holds from its first line.
pub fn detect(content: &str) -> Option<ExportKind> {
  let first = content.lines().next()?.trim_start_matches('\u{feff}').trim();
  if first.starts_with(CALENDAR_CSV_HEADER[0]) {
    Some(ExportKind::CalendarCsv)
  } else if first.starts_with(CONTACTS_CSV_HEADER[0]) {
    Some(ExportKind::ContactsCsv)
  } else if first.starts_with("<!--vcalendar") {
    Some(ExportKind::CalendarHtml)
  } else if first.starts_with("<!--vcards") {
    Some(ExportKind::ContactsHtml)
  } else {
    None
  }
}
