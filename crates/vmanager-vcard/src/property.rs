//! The vCard keys vManager reads and writes.

use strum::{Display, EnumString};

/// Field 0 of a content line, matched ASCII case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Property {
  Begin,
  End,
  Version,
  #[strum(serialize = "N")]
  Name,
  #[strum(serialize = "FN")]
  FullName,
  Org,
  Title,
  Email,
  Tel,
  Adr,
  Note,
  Categories,
  #[strum(default)]
  Unrecognized(String),
}

impl Property {
  pub(crate) fn classify(token: &str) -> Self {
    token
      .parse()
      .unwrap_or_else(|_| Self::Unrecognized(token.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_names() {
    assert_eq!(Property::classify("fn"), Property::FullName);
    assert_eq!(Property::classify("N"), Property::Name);
    assert_eq!(Property::FullName.to_string(), "FN");
    assert_eq!(Property::Categories.to_string(), "CATEGORIES");
  }

  #[test]
  fn extensions_are_unrecognized() {
    assert_eq!(
      Property::classify("X-SOCIALPROFILE"),
      Property::Unrecognized("X-SOCIALPROFILE".to_string())
    );
  }
}
