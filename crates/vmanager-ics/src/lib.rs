//! iCalendar codec for vManager.
//!
//! Converts between `.ics` text and the [`vmanager_core::calendar`] model,
//! and between that model and the lossy CSV / HTML export formats. Pure
//! synchronous code; the [`file`] module is the only part touching disk.
//!
//! # Quick start
//!
//! ```
//! use vmanager_ics::{parse, serialize};
//!
//! let ics = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:e1\r\nSUMMARY:Meet\r\n\
//!            DTSTART:20221201T100000\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let calendar = parse(ics).unwrap();
//! assert_eq!(calendar.events[0].summary, "Meet");
//! assert!(serialize(&calendar).contains("UID:e1\r\n"));
//! ```

pub mod csv;
pub mod error;
pub mod file;
pub mod html;
pub mod parse;
pub mod property;
pub mod serialize;

pub use error::{Error, Result};
pub use parse::{CalendarBuilder, build, parse};
pub use serialize::{ToIcs, serialize};

#[cfg(test)]
mod tests;
