//! Contacts HTML microformat export and import.
//!
//! Values are trimmed on import.

use vmanager_core::{
  contact::{Contact, Email, Phone, VcardVersion},
  export::CONTACTS_HTML_MARKER,
  html::{HtmlPage, MicroformatWriter, scan},
};

use crate::error::Result;

const VCARD: &str = "vcard";

/// Render `contacts` as HTML microformats: one `vcard` block each, with one
/// `org`, `email` or `tel` child per value.
pub fn to_html(contacts: &[Contact], page: &HtmlPage) -> Result<String> {
  let mut w = MicroformatWriter::new(CONTACTS_HTML_MARKER, page)?;

  for c in contacts {
    w.open(VCARD)?;
    w.div("fn", &c.full_name)?;
    w.div("title", &c.title)?;
    for org in &c.organizations {
      w.div("org", org)?;
    }
    for email in &c.emails {
      w.div("email", &email.address)?;
    }
    for phone in &c.phones {
      w.div("tel", &phone.number)?;
    }
    w.div("note", &c.note)?;
    w.close()?;
  }

  Ok(w.finish()?)
}

/// Rebuild contacts from an HTML export.
pub fn from_html(input: &str) -> Result<Vec<Contact>> {
  let contacts = scan(input, &[VCARD])?
    .into_iter()
    .map(|block| {
      let text = |class: &str| block.get(class).unwrap_or_default().to_string();
      Contact {
        version: Some(VcardVersion::V3_0),
        full_name: text("fn"),
        title: text("title"),
        organizations: block.all("org").map(str::to_string).collect(),
        emails: block.all("email").map(Email::new).collect(),
        phones: block.all("tel").map(Phone::new).collect(),
        note: text("note"),
        ..Contact::new()
      }
    })
    .collect();
  Ok(contacts)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn bob() -> Contact {
    Contact {
      version: Some(VcardVersion::V3_0),
      full_name: "Bob <The Builder>".into(),
      title: "Foreman".into(),
      organizations: vec!["Bob & Co".into()],
      emails: vec![Email::new("bob@example.org"), Email::new("b@work.net")],
      phones: vec![Phone::new("0102030405")],
      note: "Can we fix it?".into(),
      ..Contact::new()
    }
  }

  #[test]
  fn export_layout() {
    let out = to_html(&[bob()], &HtmlPage::fragment()).unwrap();
    assert!(out.starts_with("<!--vcards_export-->"));
    assert!(out.contains(r#"<div class="vcard">"#));
    assert!(out.contains(r#"<div class="fn">Bob &lt;The Builder&gt;</div>"#));
    assert_eq!(out.matches(r#"class="email""#).count(), 2);
  }

  #[test]
  fn round_trip_keeps_microformat_fields() {
    for page in [HtmlPage::fragment(), HtmlPage::complete("en", "People")] {
      let back = from_html(&to_html(&[bob()], &page).unwrap()).unwrap();
      assert_eq!(back, [bob()]);
    }
  }

  #[test]
  fn missing_children_are_empty() {
    let back = from_html(r#"<div class="vcard"><div class="fn">Eve</div></div>"#)
      .unwrap();
    assert_eq!(back[0].full_name, "Eve");
    assert_eq!(back[0].title, "");
    assert!(back[0].emails.is_empty());
  }
}
