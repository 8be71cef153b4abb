//! vCard writer.
//!
//! Produces CRLF line endings and folds at 75 octets. Empty fields and
//! empty lists are left out.

use std::collections::BTreeSet;

use vmanager_core::{
  contact::{Address, Contact, Email, Phone, VcardVersion},
  line::fold_line,
};

use crate::property::Property;

// ─── TYPE helpers ────────────────────────────────────────────────────────────

/// `;TYPE=A;TYPE=B[;TYPE=PREF]`
fn type_params(types: &BTreeSet<String>, preferred: bool) -> String {
  let mut params: String = types.iter().map(|t| format!(";TYPE={t}")).collect();
  if preferred {
    params.push_str(";TYPE=PREF");
  }
  params
}

fn push_typed(
  lines: &mut Vec<String>,
  property: Property,
  types: &BTreeSet<String>,
  preferred: bool,
  value: &str,
) {
  lines.push(fold_line(&format!(
    "{property}{}:{value}",
    type_params(types, preferred)
  )));
}

fn push_nonempty(lines: &mut Vec<String>, property: Property, value: &str) {
  if !value.is_empty() {
    lines.push(fold_line(&format!("{property}:{value}")));
  }
}

// ─── Encoders ────────────────────────────────────────────────────────────────

/// Native vCard encoding of one entity.
pub trait ToVcf {
  /// Append this entity's folded content lines.
  fn write_vcf(&self, lines: &mut Vec<String>);

  fn to_vcf(&self) -> String {
    let mut lines = Vec::new();
    self.write_vcf(&mut lines);
    lines.concat()
  }
}

impl ToVcf for Email {
  fn write_vcf(&self, lines: &mut Vec<String>) {
    push_typed(lines, Property::Email, &self.types, self.preferred, &self.address);
  }
}

impl ToVcf for Phone {
  fn write_vcf(&self, lines: &mut Vec<String>) {
    push_typed(lines, Property::Tel, &self.types, self.preferred, &self.number);
  }
}

impl ToVcf for Address {
  fn write_vcf(&self, lines: &mut Vec<String>) {
    push_typed(
      lines,
      Property::Adr,
      &self.types,
      self.preferred,
      &self.components.join(";"),
    );
  }
}

impl ToVcf for Contact {
  fn write_vcf(&self, lines: &mut Vec<String>) {
    let version = self.version.unwrap_or(VcardVersion::V3_0);

    lines.push(fold_line(&format!("{}:VCARD", Property::Begin)));
    lines.push(fold_line(&format!("{}:{version}", Property::Version)));
    push_nonempty(lines, Property::Name, &self.names.join(";"));
    push_nonempty(lines, Property::FullName, &self.full_name);
    push_nonempty(lines, Property::Org, &self.organizations.join(";"));
    push_nonempty(lines, Property::Title, &self.title);
    for email in &self.emails {
      email.write_vcf(lines);
    }
    for phone in &self.phones {
      phone.write_vcf(lines);
    }
    for address in &self.addresses {
      address.write_vcf(lines);
    }
    push_nonempty(lines, Property::Note, &self.note);
    push_nonempty(lines, Property::Categories, &self.categories.join(","));
    lines.push(fold_line(&format!("{}:VCARD", Property::End)));
  }
}

/// Serialize contacts as a `.vcf` document, one card after another.
pub fn serialize(contacts: &[Contact]) -> String {
  let mut lines = Vec::new();
  for contact in contacts {
    contact.write_vcf(&mut lines);
  }
  lines.concat()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn typed_lines() {
    let mut email = Email::new("a@b.com");
    email.types.insert("WORK".to_string());
    email.types.insert("HOME".to_string());
    email.preferred = true;
    assert_eq!(
      email.to_vcf(),
      "EMAIL;TYPE=HOME;TYPE=WORK;TYPE=PREF:a@b.com\r\n"
    );
    assert_eq!(Phone::new("123").to_vcf(), "TEL:123\r\n");
  }

  #[test]
  fn address_components_are_semicolon_joined() {
    let address = Address::new(vec!["1 Main St".into(), "Springfield".into()]);
    assert_eq!(address.to_vcf(), "ADR:1 Main St;Springfield\r\n");
  }

  #[test]
  fn empty_contact_is_just_the_envelope() {
    assert_eq!(
      Contact::new().to_vcf(),
      "BEGIN:VCARD\r\nVERSION:3.0\r\nEND:VCARD\r\n"
    );
  }

  #[test]
  fn field_order() {
    let contact = Contact {
      names: vec!["Smith".into(), "Alice".into()],
      full_name: "Alice Smith".into(),
      organizations: vec!["Acme".into(), "R&D".into()],
      note: "hi".into(),
      categories: vec!["a".into(), "b".into()],
      ..Contact::new()
    };
    assert_eq!(
      contact.to_vcf(),
      "BEGIN:VCARD\r\nVERSION:3.0\r\nN:Smith;Alice\r\nFN:Alice Smith\r\n\
       ORG:Acme;R&D\r\nNOTE:hi\r\nCATEGORIES:a,b\r\nEND:VCARD\r\n"
    );
  }

  #[test]
  fn declared_version_is_kept() {
    let contact = Contact {
      version: Some(VcardVersion::V4_0),
      ..Contact::new()
    };
    assert!(contact.to_vcf().contains("VERSION:4.0\r\n"));
  }
}
