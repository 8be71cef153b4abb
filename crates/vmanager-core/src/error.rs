//! Error types for `vmanager-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed timestamp in {property}: {value:?}")]
  MalformedTimestamp { property: String, value: String },

  #[error("markup error: {0}")]
  Markup(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
