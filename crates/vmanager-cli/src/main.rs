//! `vmanager`: read, re-save and convert iCalendar and vCard files.
//!
//! # Usage
//!
//! ```text
//! vmanager show agenda.ics
//! vmanager show people.vcf --json
//! vmanager export agenda.ics --format html --full-page
//! vmanager import agenda.csv -o restored.ics
//! ```

mod settings;

use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vmanager_core::{
  calendar::Calendar,
  contact::Contact,
  export::detect,
  time::format_human,
};

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "vmanager", version, about = "iCalendar and vCard manager")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "vmanager.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print what a `.ics` or `.vcf` file holds.
  Show {
    path: PathBuf,
    /// Dump the parsed model as JSON instead.
    #[arg(long)]
    json: bool,
  },
  /// Parse and write back a `.ics` or `.vcf` file.
  Save {
    path:   PathBuf,
    /// Defaults to overwriting the input.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Convert a `.ics` or `.vcf` file to CSV or HTML.
  Export {
    path:      PathBuf,
    #[arg(long, value_enum)]
    format:    Format,
    /// Wrap HTML output in a complete page.
    #[arg(long)]
    full_page: bool,
    /// Defaults to the input path with the format's extension.
    #[arg(short, long)]
    output:    Option<PathBuf>,
  },
  /// Rebuild a `.ics` or `.vcf` file from a CSV or HTML export.
  Import {
    path:   PathBuf,
    /// Defaults to the input path with `.ics` or `.vcf`.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
  Csv,
  Html,
}

impl Format {
  fn extension(self) -> &'static str {
    match self {
      Format::Csv => "csv",
      Format::Html => "html",
    }
  }
}

// ─── Documents ───────────────────────────────────────────────────────────────

/// A loaded native file.
#[derive(Debug)]
enum Document {
  Calendar(Calendar),
  Contacts(Vec<Contact>),
}

fn has_extension(path: &Path, ext: &str) -> bool {
  path
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

impl Document {
  fn read(path: &Path) -> Result<Self> {
    if has_extension(path, "ics") {
      let calendar = vmanager_ics::file::read(path)
        .with_context(|| format!("cannot read calendar {}", path.display()))?;
      Ok(Document::Calendar(calendar))
    } else if has_extension(path, "vcf") {
      let contacts = vmanager_vcard::file::read(path)
        .with_context(|| format!("cannot read contacts {}", path.display()))?;
      Ok(Document::Contacts(contacts))
    } else {
      bail!("{} is neither a .ics nor a .vcf file", path.display())
    }
  }

  fn native_extension(&self) -> &'static str {
    match self {
      Document::Calendar(_) => "ics",
      Document::Contacts(_) => "vcf",
    }
  }

  fn save(&self, path: &Path) -> Result<()> {
    match self {
      Document::Calendar(c) => vmanager_ics::file::save(c, path)?,
      Document::Contacts(c) => vmanager_vcard::file::save(c, path)?,
    }
    Ok(())
  }

  fn export(
    &self,
    path: &Path,
    format: Format,
    full_page: bool,
    settings: &Settings,
  ) -> Result<()> {
    match (self, format) {
      (Document::Calendar(c), Format::Csv) => {
        vmanager_ics::file::export_csv(c, path)?
      }
      (Document::Calendar(c), Format::Html) => {
        vmanager_ics::file::export_html(c, path, &settings.page(full_page, true))?
      }
      (Document::Contacts(c), Format::Csv) => {
        vmanager_vcard::file::export_csv(c, path)?
      }
      (Document::Contacts(c), Format::Html) => vmanager_vcard::file::export_html(
        c,
        path,
        &settings.page(full_page, false),
      )?,
    }
    Ok(())
  }

  fn import(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("cannot read {}", path.display()))?;
    let Some(kind) = detect(&content) else {
      bail!("{} is not a vManager export", path.display())
    };

    if kind.is_calendar() {
      let calendar = vmanager_ics::file::import_exported(path)
        .with_context(|| format!("cannot import {}", path.display()))?;
      Ok(Document::Calendar(calendar))
    } else {
      let contacts = vmanager_vcard::file::import_exported(path)
        .with_context(|| format!("cannot import {}", path.display()))?;
      Ok(Document::Contacts(contacts))
    }
  }

  fn to_json(&self) -> Result<String> {
    let json = match self {
      Document::Calendar(c) => serde_json::to_string_pretty(c)?,
      Document::Contacts(c) => serde_json::to_string_pretty(c)?,
    };
    Ok(json)
  }

  /// One line per entity.
  fn summary(&self) -> Vec<String> {
    match self {
      Document::Calendar(cal) => {
        let events = cal.events.iter().map(|e| {
          format!(
            "event  {} → {}  {}",
            format_human(&e.start_at),
            format_human(&e.end_at),
            e.summary
          )
        });
        let todos = cal.todos.iter().map(|t| {
          format!("todo   {}  {}", format_human(&t.start_at), t.summary)
        });
        events.chain(todos).collect()
      }
      Document::Contacts(contacts) => contacts
        .iter()
        .map(|c| {
          let email = c.emails.first().map(|e| e.address.as_str());
          match email {
            Some(email) => format!("{} <{email}>", c.display_name()),
            None => c.display_name(),
          }
        })
        .collect(),
    }
  }
}

/// `path` with its extension swapped for `ext`, unless that file already
/// exists.
fn default_target(path: &Path, ext: &str) -> Result<PathBuf> {
  let target = path.with_extension(ext);
  if target.exists() {
    bail!(
      "{} already exists; pass -o to choose the output",
      target.display()
    )
  }
  Ok(target)
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let settings = Settings::load(&args.config)?;

  match args.command {
    Command::Show { path, json } => {
      let document = Document::read(&path)?;
      if json {
        println!("{}", document.to_json()?);
      } else {
        for line in document.summary() {
          println!("{line}");
        }
      }
    }
    Command::Save { path, output } => {
      let document = Document::read(&path)?;
      document.save(output.as_deref().unwrap_or(&path))?;
    }
    Command::Export {
      path,
      format,
      full_page,
      output,
    } => {
      let document = Document::read(&path)?;
      let output = match output {
        Some(output) => output,
        None => default_target(&path, format.extension())?,
      };
      document.export(&output, format, full_page, &settings)?;
    }
    Command::Import { path, output } => {
      let document = Document::import(&path)?;
      let output = match output {
        Some(output) => output,
        None => default_target(&path, document.native_extension())?,
      };
      document.save(&output)?;
    }
  }

  Ok(())
}
