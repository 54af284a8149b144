//! Zero-copy, non-allocating cursor iteration over TOML documents.
//!
//! Nothing is parsed up front. A [`Document`] borrows the source and hands
//! out small `Copy` cursors: [`Table`]s in header order, [`Entry`]s for each
//! `key = value` line, and [`Value`]s classified by [`Kind`]. Scalars are
//! decoded on demand, strings into a caller supplied buffer.
//!
//! Each `next_*` method takes the previous cursor (or `None` to start) and
//! returns the following one, so a walk needs no iterator state at all. The
//! `tables()`, `keys()`, `elements()` and `entries()` adapters wrap the same
//! calls as [`Iterator`]s.
//!
//! # Examples
//!
//! ```
//! use toml_cursor::{Document, Kind};
//!
//! let content = r#"
//! title = "TOML Example"
//!
//! [owner]
//! name = "Tom"
//! ports = [ 8000, 8001, 0x1F43 ]
//! "#;
//!
//! let doc = Document::new(content)?;
//! let mut names = Vec::new();
//! for table in doc.tables() {
//!     let table = table?;
//!     for entry in table.keys() {
//!         let entry = entry?;
//!         names.push(String::from_utf8_lossy(entry.key().raw()).into_owned());
//!     }
//! }
//! assert_eq!(names, ["title", "name", "ports"]);
//!
//! let ports = doc.find_path("owner:ports")?.unwrap();
//! assert_eq!(ports.kind(), Kind::Array);
//! let mut total = 0;
//! for port in ports.elements() {
//!     total += port?.as_integer()?;
//! }
//! assert_eq!(total, 8000 + 8001 + 8003);
//! # Ok::<(), toml_cursor::Error>(())
//! ```
//!
//! # Features
//!
//! - `float`: classify and decode floats. Without it floats are [`Kind::Unknown`].
//! - `date`: classify and decode date-times as [`DateTime`]. Without it they
//!   are [`Kind::Unknown`].
//! - `serde`: `serde::Serialize` for cursors, decoding values on the fly.
//! - `reporting`: [`Error::to_diagnostic`] for `codespan-reporting`.

mod array;
mod classify;
pub mod decode;
mod document;
mod error;
mod find;
mod key;
mod lex;
mod span;
mod table;
#[cfg(feature = "date")]
mod time;
mod value;

pub use array::{Elements, Entries};
pub use classify::classify;
pub use document::{Document, Tables};
pub use error::{Error, ErrorKind};
pub use key::{Atom, Atoms, Entry, Key};
pub use lex::{is_bare_key_char, line_length, skip_blanks};
pub use span::Span;
pub use table::{Keys, Table, TableKind};
#[cfg(feature = "date")]
#[cfg_attr(docsrs, doc(cfg(feature = "date")))]
pub use time::{DateTime, DateTimeParseError};
pub use value::{Kind, Value};

#[cfg(feature = "serde")]
pub mod impl_serde;
