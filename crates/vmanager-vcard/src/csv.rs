//! Contacts CSV export and import.
//!
//! Multi-valued columns are `/`-joined; each address is flattened to its
//! components joined by spaces. Types, preference flags, names, titles,
//! notes and categories are not carried.

use vmanager_core::{
  contact::{Address, Contact, Email, Phone, VcardVersion},
  export::CONTACTS_CSV_HEADER,
};

use crate::error::{Error, Result};

const SEPARATOR: &str = "/";

fn split(column: &str) -> impl Iterator<Item = String> + '_ {
  column
    .split(SEPARATOR)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
}

/// Render `contacts` as CSV, `\n`-terminated.
pub fn to_csv(contacts: &[Contact]) -> Result<String> {
  let mut writer = csv::WriterBuilder::new()
    .terminator(csv::Terminator::Any(b'\n'))
    .from_writer(Vec::new());

  writer.write_record(CONTACTS_CSV_HEADER)?;
  for c in contacts {
    let emails: Vec<&str> = c.emails.iter().map(|e| e.address.as_str()).collect();
    let phones: Vec<&str> = c.phones.iter().map(|p| p.number.as_str()).collect();
    let addresses: Vec<String> = c.addresses.iter().map(Address::one_line).collect();
    writer.write_record([
      c.full_name.clone(),
      emails.join(SEPARATOR),
      phones.join(SEPARATOR),
      addresses.join(SEPARATOR),
      c.organizations.join(SEPARATOR),
    ])?;
  }

  let bytes = writer
    .into_inner()
    .map_err(|e| csv::Error::from(e.into_error()))?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Rebuild contacts from a CSV export. The first row is the header.
///
/// Each address comes back as a single component.
pub fn from_csv(input: &str) -> Result<Vec<Contact>> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(input.as_bytes());

  let mut contacts = Vec::new();
  for (index, record) in reader.records().enumerate() {
    let record = record?;
    let columns: Vec<&str> = record.iter().collect();
    let [full_name, emails, phones, addresses, organizations, ..] = columns[..]
    else {
      return Err(Error::MalformedRow {
        // header is row 1
        row:    index as u64 + 2,
        reason: format!(
          "expected {} columns, found {}",
          CONTACTS_CSV_HEADER.len(),
          record.len()
        ),
      });
    };

    contacts.push(Contact {
      version: Some(VcardVersion::V3_0),
      full_name: full_name.to_string(),
      emails: split(emails).map(Email::new).collect(),
      phones: split(phones).map(Phone::new).collect(),
      addresses: split(addresses).map(|a| Address::new(vec![a])).collect(),
      organizations: split(organizations).collect(),
      ..Contact::new()
    });
  }

  Ok(contacts)
}
