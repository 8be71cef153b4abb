//! Layered settings: built-in defaults, then `vmanager.toml`, then
//! `VMANAGER_*` environment variables.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use vmanager_core::html::HtmlPage;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// `lang` of full-page HTML exports.
  pub html_lang:           String,
  pub calendar_page_title: String,
  pub contacts_page_title: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      html_lang:           "fr".to_string(),
      calendar_page_title: "Exported Calendar".to_string(),
      contacts_page_title: "Exported Contacts".to_string(),
    }
  }
}

impl Settings {
  /// A missing file is not an error; a malformed one is.
  pub fn load(path: &Path) -> Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("VMANAGER"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn page(&self, full_page: bool, calendar: bool) -> HtmlPage {
    if !full_page {
      return HtmlPage::fragment();
    }
    let title = if calendar {
      &self.calendar_page_title
    } else {
      &self.contacts_page_title
    };
    HtmlPage::complete(&self.html_lang, title)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings, Settings::default());
  }

  #[test]
  fn file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vmanager.toml");
    std::fs::write(&path, "html_lang = \"en\"\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.html_lang, "en");
    assert_eq!(settings.calendar_page_title, "Exported Calendar");
  }

  #[test]
  fn page_choice() {
    let settings = Settings::default();
    assert!(!settings.page(false, true).complete);
    let page = settings.page(true, false);
    assert!(page.complete);
    assert_eq!(page.lang, "fr");
    assert_eq!(page.title, "Exported Contacts");
  }
}
