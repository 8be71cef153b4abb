//! Reading and writing calendar files on disk.

use std::{fs, path::Path};

use tracing::info;
use vmanager_core::{
  calendar::Calendar,
  export::{ExportKind, detect},
  html::HtmlPage,
};

use crate::{
  csv::{from_csv, to_csv},
  error::{Error, Result},
  html::{from_html, to_html},
  parse::parse,
  serialize::serialize,
};

fn read_text(path: &Path) -> Result<String> {
  fs::read_to_string(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
  fs::write(path, contents).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })
}

/// Load a `.ics` file.
pub fn read(path: impl AsRef<Path>) -> Result<Calendar> {
  let path = path.as_ref();
  let calendar = parse(&read_text(path)?)?;
  info!(
    path = %path.display(),
    events = calendar.events.len(),
    todos = calendar.todos.len(),
    "read calendar"
  );
  Ok(calendar)
}

/// Write `calendar` as a `.ics` file, replacing any existing file.
pub fn save(calendar: &Calendar, path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  write_text(path, &serialize(calendar))?;
  info!(path = %path.display(), "saved calendar");
  Ok(())
}

pub fn export_csv(calendar: &Calendar, path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  write_text(path, &to_csv(calendar)?)?;
  info!(path = %path.display(), "exported calendar as CSV");
  Ok(())
}

pub fn export_html(
  calendar: &Calendar,
  path: impl AsRef<Path>,
  page: &HtmlPage,
) -> Result<()> {
  let path = path.as_ref();
  write_text(path, &to_html(calendar, page)?)?;
  info!(path = %path.display(), complete = page.complete, "exported calendar as HTML");
  Ok(())
}

/// Rebuild a calendar from a file written by [`export_csv`] or
/// [`export_html`].
pub fn import_exported(path: impl AsRef<Path>) -> Result<Calendar> {
  let path = path.as_ref();
  let content = read_text(path)?;
  let calendar = match detect(&content) {
    Some(ExportKind::CalendarCsv) => from_csv(&content)?,
    Some(ExportKind::CalendarHtml) => from_html(&content)?,
    _ => return Err(Error::UnrecognizedExport(path.to_path_buf())),
  };
  info!(path = %path.display(), "imported calendar export");
  Ok(calendar)
}
