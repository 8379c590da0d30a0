//! Decoding TrueType and OpenType font files
//!
//! This crate decodes the binary sfnt container: the table directory, the
//! fixed-layout tables (`head`, `hhea`, `maxp`, `OS/2`, `name`, `post`, ...),
//! the tables that depend on each other (`loca`, `hmtx` and `glyf`), character
//! maps, kerning and the structural parts of the OpenType layout tables.
//!
//! Decoding reads from any [`ByteSource`]: a seekable big-endian reader.
//! [`SliceSource`] reads from memory, and (with the `std` feature)
//! [`IoSource`] adapts any [`std::io::Read`] + [`std::io::Seek`].
//!
//! Every table is decoded once, up front, into owned and immutable
//! structures. A [`Font`] can be shared freely between threads.
//!
//! Fonts in the wild are frequently damaged. Loading is tolerant of this:
//! only a corrupt table directory fails the whole load. A table that cannot
//! be decoded is left out, a glyph that cannot be decoded has no outline,
//! and each of these events is logged (with the [`log`] crate) and recorded
//! in [`Font::diagnostics`].
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use ttf_reader::{Font, SliceSource};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = Font::load(&mut SliceSource::new(&font_bytes)).expect("invalid table directory");
//! println!("{} has {} glyphs", font.font_family_name(), font.num_glyphs());
//! if let Some(glyph) = font.glyph(3) {
//!     println!("glyph 3 advance: {}", glyph.advance_width());
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

extern crate alloc;

mod decycler;
mod directory;
mod error;
mod font;
mod font_data;
mod glyph;
mod loader;
mod read;
mod registry;
mod source;
mod table;
pub mod tables;

pub use decycler::DecyclerError;
pub use directory::{TableDirectory, TableEntry};
pub use error::{FontError, ReadError};
pub use font::Font;
pub use font_data::{Cursor, FontData};
pub use glyph::{AssembledGlyph, Point};
pub use loader::{FontLoader, LoadOptions};
pub use read::{FontRead, TopLevelTable};
pub use registry::TableRegistry;
pub use source::{ByteSource, SliceSource};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use table::{tags, Table};

/// Public re-export of the ttf-types crate.
pub extern crate ttf_types as types;
