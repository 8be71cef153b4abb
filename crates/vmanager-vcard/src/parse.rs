//! vCard reader.
//!
//! Pipeline:
//!   raw &str
//!     └─ content_lines()         → Vec<String>
//!          └─ parse_many()       → one slice per BEGIN/END:VCARD group
//!               └─ build()       → VERSION dispatch
//!                    └─ ContactBuilder::feed() per line (3.0 only)

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};
use vmanager_core::{
  contact::{Address, Contact, Email, Phone, VcardVersion},
  line::{content_lines, param_name, param_value, tokenize},
};

use crate::property::Property;

// ─── Field helpers ───────────────────────────────────────────────────────────

/// Tokenize, then drop empty fields other than the last.
fn fields(line: &str) -> Vec<String> {
  let mut fields = tokenize(line);
  let last = fields.len() - 1;
  let mut index = 0;
  fields.retain(|f| {
    let keep = index == 0 || index == last || !f.is_empty();
    index += 1;
    keep
  });
  fields
}

/// Only `TYPE=…` counts; a payload that merely starts with "type" does not.
fn is_type_param(field: &str) -> bool {
  field.contains('=') && param_name(field).eq_ignore_ascii_case("TYPE")
}

fn is_pref(value: &str) -> bool {
  value.len() >= 4
    && value
      .get(value.len() - 4..)
      .is_some_and(|suffix| suffix.eq_ignore_ascii_case("PREF"))
}

/// `TYPE=…` parameters and payload fields of an `EMAIL`, `TEL` or `ADR` line.
#[derive(Default)]
struct Typed {
  types:     BTreeSet<String>,
  preferred: bool,
  payload:   Vec<String>,
}

fn typed(values: &[String]) -> Typed {
  let mut typed = Typed::default();
  for field in values {
    if is_type_param(field) {
      for value in param_value(field).unwrap_or_default().split(',') {
        if is_pref(value) {
          typed.preferred = true;
        } else if !value.is_empty() {
          typed.types.insert(value.to_uppercase());
        }
      }
    } else {
      typed.payload.push(field.clone());
    }
  }
  typed
}

/// A key with no value leaves the field as it was.
fn set(target: &mut String, value: Option<String>) {
  if let Some(value) = value {
    *target = value;
  }
}

fn non_empty(values: &[String]) -> impl Iterator<Item = String> + '_ {
  values.iter().filter(|v| !v.is_empty()).cloned()
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Accumulates the properties of one vCard 3.0 card.
#[derive(Debug)]
pub struct ContactBuilder {
  contact: Contact,
}

impl Default for ContactBuilder {
  fn default() -> Self { Self::new() }
}

impl ContactBuilder {
  pub fn new() -> Self {
    Self {
      contact: Contact {
        version: Some(VcardVersion::V3_0),
        ..Contact::new()
      },
    }
  }

  /// Consume one logical line of the card.
  pub fn feed(&mut self, line: &str) {
    let fields = fields(line);
    let values = &fields[1..];
    let first = values.first().cloned();
    let c = &mut self.contact;

    match Property::classify(&fields[0]) {
      Property::Name => c.names.extend(non_empty(values)),
      Property::FullName => set(&mut c.full_name, first),
      Property::Org => c.organizations.extend(non_empty(values)),
      Property::Title => set(&mut c.title, first),
      Property::Note => set(&mut c.note, first),
      Property::Categories => {
        if let Some(list) = first {
          c.categories.extend(
            list
              .split(',')
              .filter(|s| !s.is_empty())
              .map(str::to_string),
          );
        }
      }
      Property::Email => {
        let t = typed(values);
        if let Some(address) = t.payload.into_iter().rfind(|v| !v.is_empty()) {
          c.emails.push(Email {
            address,
            types: t.types,
            preferred: t.preferred,
          });
        }
      }
      Property::Tel => {
        let t = typed(values);
        if let Some(number) = t.payload.into_iter().rfind(|v| !v.is_empty()) {
          c.phones.push(Phone {
            number,
            types: t.types,
            preferred: t.preferred,
          });
        }
      }
      Property::Adr => {
        let t = typed(values);
        let components: Vec<String> = non_empty(&t.payload).collect();
        if !components.is_empty() {
          c.addresses.push(Address {
            components,
            types: t.types,
            preferred: t.preferred,
          });
        }
      }
      other => trace!(?other, "ignoring vCard key"),
    }
  }

  pub fn finish(self) -> Contact { self.contact }
}

// ─── Version dispatch ────────────────────────────────────────────────────────

/// The value of the first `VERSION:` line, if any.
fn declared_version<S: AsRef<str>>(lines: &[S]) -> Option<&str> {
  lines.iter().find_map(|line| {
    let line = line.as_ref();
    line
      .get(..8)
      .filter(|prefix| prefix.eq_ignore_ascii_case("VERSION:"))
      .map(|_| line[8..].trim())
  })
}

/// Build one contact from the lines between `BEGIN:VCARD` and `END:VCARD`.
///
/// Only vCard 3.0 is extracted. A 2.1 or 4.0 card comes back carrying
/// nothing but its version; a card with no usable version comes back empty.
pub fn build<S: AsRef<str>>(lines: &[S]) -> Contact {
  let Some(declared) = declared_version(lines) else {
    debug!("vCard without VERSION, skipping");
    return Contact::new();
  };

  match declared.parse::<VcardVersion>() {
    Ok(VcardVersion::V3_0) => {
      let mut builder = ContactBuilder::new();
      for line in lines {
        builder.feed(line.as_ref());
      }
      builder.finish()
    }
    Ok(version) => {
      warn!(%version, "vCard version not supported yet, card left empty");
      Contact {
        version: Some(version),
        ..Contact::new()
      }
    }
    Err(_) => {
      debug!(declared, "unknown vCard version, skipping");
      Contact::new()
    }
  }
}

/// Parse every card in a `.vcf` document.
///
/// A trailing card with no `END:VCARD` is dropped.
pub fn parse_many(input: &str) -> Vec<Contact> {
  let lines = content_lines(input);
  let mut contacts = Vec::new();
  let mut i = 0;

  while i < lines.len() {
    if !lines[i].eq_ignore_ascii_case("BEGIN:VCARD") {
      i += 1;
      continue;
    }

    let start = i + 1;
    let Some(offset) = lines[start..]
      .iter()
      .position(|l| l.eq_ignore_ascii_case("END:VCARD"))
    else {
      warn!(line = i + 1, "vCard without END:VCARD dropped");
      break;
    };

    let end = start + offset;
    contacts.push(build(&lines[start..end]));
    i = end + 1;
  }

  contacts
}
