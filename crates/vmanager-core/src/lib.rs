//! Core types for vManager.
//!
//! Holds the calendar and contact entity graphs together with the
//! line-level helpers shared by the iCalendar and vCard codecs. Pure
//! synchronous; no file-system access lives here.

pub mod calendar;
pub mod contact;
pub mod error;
pub mod export;
pub mod html;
pub mod line;
pub mod time;

pub use error::{Error, Result};
