//! vCard 3.0 codec for vManager.
//!
//! Converts between `.vcf` text and [`vmanager_core::contact::Contact`]s,
//! and between contacts and the lossy CSV / HTML export formats. Cards
//! declaring 2.1 or 4.0 are recognised but not extracted.
//!
//! # Quick start
//!
//! ```
//! use vmanager_vcard::{parse_many, serialize};
//!
//! let vcf = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Alice Smith\r\nEND:VCARD\r\n";
//! let contacts = parse_many(vcf);
//! assert_eq!(contacts[0].full_name, "Alice Smith");
//! assert_eq!(serialize(&contacts), vcf);
//! ```

pub mod csv;
pub mod error;
pub mod file;
pub mod html;
pub mod parse;
pub mod property;
pub mod serialize;

pub use error::{Error, Result};
pub use parse::{ContactBuilder, build, parse_many};
pub use serialize::{ToVcf, serialize};
