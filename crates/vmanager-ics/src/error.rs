//! Error types for the iCalendar codec.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] vmanager_core::Error),

  #[error("cannot access {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("malformed row {row}: {reason}")]
  MalformedRow { row: u64, reason: String },

  #[error("{} is not a calendar export", .0.display())]
  UnrecognizedExport(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
