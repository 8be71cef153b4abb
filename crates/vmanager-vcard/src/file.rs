//! Reading and writing contact files on disk.

use std::{fs, path::Path};

use tracing::info;
use vmanager_core::{
  contact::Contact,
  export::{ExportKind, detect},
  html::HtmlPage,
};

use crate::{
  csv::{from_csv, to_csv},
  error::{Error, Result},
  html::{from_html, to_html},
  parse::parse_many,
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

/// Load every card of a `.vcf` file.
pub fn read(path: impl AsRef<Path>) -> Result<Vec<Contact>> {
  let path = path.as_ref();
  let contacts = parse_many(&read_text(path)?);
  info!(path = %path.display(), contacts = contacts.len(), "read contacts");
  Ok(contacts)
}

/// Write `contacts` as a `.vcf` file, replacing any existing file.
pub fn save(contacts: &[Contact], path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  write_text(path, &serialize(contacts))?;
  info!(path = %path.display(), "saved contacts");
  Ok(())
}

pub fn export_csv(contacts: &[Contact], path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  write_text(path, &to_csv(contacts)?)?;
  info!(path = %path.display(), "exported contacts as CSV");
  Ok(())
}

pub fn export_html(
  contacts: &[Contact],
  path: impl AsRef<Path>,
  page: &HtmlPage,
) -> Result<()> {
  let path = path.as_ref();
  write_text(path, &to_html(contacts, page)?)?;
  info!(path = %path.display(), complete = page.complete, "exported contacts as HTML");
  Ok(())
}

/// Rebuild contacts from a file written by [`export_csv`] or
/// [`export_html`].
pub fn import_exported(path: impl AsRef<Path>) -> Result<Vec<Contact>> {
  let path = path.as_ref();
  let content = read_text(path)?;
  let contacts = match detect(&content) {
    Some(ExportKind::ContactsCsv) => from_csv(&content)?,
    Some(ExportKind::ContactsHtml) => from_html(&content)?,
    _ => return Err(Error::UnrecognizedExport(path.to_path_buf())),
  };
  info!(path = %path.display(), contacts = contacts.len(), "imported contacts export");
  Ok(contacts)
}
