//! Contact entities, mirroring the vCard 3.0 properties vManager understands.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Version ─────────────────────────────────────────────────────────────────

/// The `VERSION` a card declares. Only 3.0 has an extraction routine; the
/// others are recognised so they can be reported, not silently mis-read.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumString,
  Serialize,
  Deserialize,
)]
pub enum VcardVersion {
  #[strum(serialize = "2.1")]
  #[serde(rename = "2.1")]
  V2_1,
  #[strum(serialize = "3.0")]
  #[serde(rename = "3.0")]
  V3_0,
  #[strum(serialize = "4.0")]
  #[serde(rename = "4.0")]
  V4_0,
}

impl VcardVersion {
  pub fn is_supported(self) -> bool { matches!(self, Self::V3_0) }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  /// `None` when the card carried no recognisable `VERSION` line.
  pub version:       Option<VcardVersion>,
  /// `N` components in file order.
  pub names:         Vec<String>,
  /// `FN`.
  pub full_name:     String,
  /// Every `ORG` component, accumulated across lines.
  pub organizations: Vec<String>,
  pub title:         String,
  pub emails:        Vec<Email>,
  pub phones:        Vec<Phone>,
  pub addresses:     Vec<Address>,
  pub note:          String,
  pub categories:    Vec<String>,
}

impl Contact {
  pub fn new() -> Self { Self::default() }

  /// `FN` when present, otherwise the `N` components joined by spaces.
  pub fn display_name(&self) -> String {
    if self.full_name.is_empty() {
      self.names.join(" ")
    } else {
      self.full_name.clone()
    }
  }

  /// True when nothing but (possibly) the version was extracted.
  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
      && self.full_name.is_empty()
      && self.organizations.is_empty()
      && self.title.is_empty()
      && self.emails.is_empty()
      && self.phones.is_empty()
      && self.addresses.is_empty()
      && self.note.is_empty()
      && self.categories.is_empty()
  }
}

// ─── Contact methods ─────────────────────────────────────────────────────────

/// An `EMAIL` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
  pub address:   String,
  /// Uppercase `TYPE` tags (`WORK`, `HOME`, …), `PREF` excluded.
  pub types:     BTreeSet<String>,
  pub preferred: bool,
}

impl Email {
  pub fn new(address: impl Into<String>) -> Self {
    Self {
      address: address.into(),
      ..Self::default()
    }
  }
}

/// A `TEL` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
  pub number:    String,
  pub types:     BTreeSet<String>,
  pub preferred: bool,
}

impl Phone {
  pub fn new(number: impl Into<String>) -> Self {
    Self {
      number: number.into(),
      ..Self::default()
    }
  }
}

/// An `ADR` line; components are kept in file order with empty ones dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub components: Vec<String>,
  pub types:      BTreeSet<String>,
  pub preferred:  bool,
}

impl Address {
  pub fn new(components: Vec<String>) -> Self {
    Self {
      components,
      ..Self::default()
    }
  }

  /// Components joined by single spaces, as shown in CSV exports.
  pub fn one_line(&self) -> String { self.components.join(" ") }
}
