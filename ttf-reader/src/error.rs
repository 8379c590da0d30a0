//! Errors produced while decoding

use types::{GlyphId, Tag};

use crate::DecyclerError;

/// An error that occurs when reading font data.
///
/// These are produced by the low level readers: a [`ByteSource`](crate::ByteSource),
/// or a [`FontData`](crate::FontData) buffer holding the bytes of one table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ReadError {
    #[error("An offset was out of bounds")]
    OutOfBounds,
    // i64 is flexible enough to store any value we might encounter
    #[error("Invalid format '{0}'")]
    InvalidFormat(i64),
    #[error("Invalid sfnt version 0x{0:08X}")]
    InvalidSfnt(u32),
    #[error("Invalid array length")]
    InvalidArrayLen,
    #[error("The '{0}' table is missing")]
    TableIsMissing(Tag),
    #[error("Malformed data: '{0}'")]
    MalformedData(&'static str),
    #[cfg(feature = "std")]
    #[error("An I/O error occurred: {0}")]
    Io(std::io::ErrorKind),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => ReadError::OutOfBounds,
            kind => ReadError::Io(kind),
        }
    }
}

/// An error (or a notable recoverable condition) encountered while loading
/// a font.
///
/// Only [`FontError::MalformedDirectory`] is fatal; every other kind affects
/// a single table or glyph and is collected in
/// [`Font::diagnostics`](crate::Font::diagnostics).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FontError {
    /// The table directory is truncated or inconsistent.
    #[error("Malformed table directory: {0}")]
    MalformedDirectory(#[source] ReadError),
    /// A tag with no decoder. The table is not loaded.
    #[error("No decoder for table '{0}'")]
    UnknownTable(Tag),
    /// A table could not be read or decoded. The table is not loaded.
    #[error("Table '{tag}' is truncated or corrupt: {source}")]
    TruncatedTable {
        tag: Tag,
        #[source]
        source: ReadError,
    },
    /// A table that must be initialized from other tables could not be,
    /// because one of them is absent. The table is not loaded.
    #[error("Table '{tag}' requires the missing table '{missing}'")]
    MissingDependency { tag: Tag, missing: Tag },
    /// A single glyph outline could not be decoded.
    #[error("Failed to decode {glyph}: {source}")]
    GlyphDecodeFailure {
        glyph: GlyphId,
        #[source]
        source: ReadError,
    },
    /// A subtable format that is recognized but not supported. A neutral
    /// result (unmapped, or no pairs) is used in its place.
    #[error("Unsupported format {format} in table '{tag}'")]
    UnsupportedSubformat { tag: Tag, format: u16 },
    /// A composite glyph that refers to itself, directly or through other
    /// glyphs, or that nests deeper than the configured limit.
    #[error("Composite {glyph} could not be resolved: {source}")]
    CyclicComposite {
        glyph: GlyphId,
        #[source]
        source: DecyclerError,
    },
}

impl FontError {
    /// `true` if this error aborts loading the whole font.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FontError::MalformedDirectory(_))
    }

    /// The table this error relates to, if any.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            FontError::MalformedDirectory(_) => None,
            FontError::UnknownTable(tag)
            | FontError::TruncatedTable { tag, .. }
            | FontError::MissingDependency { tag, .. }
            | FontError::UnsupportedSubformat { tag, .. } => Some(*tag),
            FontError::GlyphDecodeFailure { .. } | FontError::CyclicComposite { .. } => {
                Some(crate::tags::GLYF)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = FontError::TruncatedTable {
            tag: Tag::new(b"hhea"),
            source: ReadError::OutOfBounds,
        };
        assert_eq!(
            err.to_string(),
            "Table 'hhea' is truncated or corrupt: An offset was out of bounds"
        );
        assert_eq!(err.tag(), Some(Tag::new(b"hhea")));
        assert!(!err.is_fatal());
        assert!(FontError::MalformedDirectory(ReadError::InvalidSfnt(0xdead)).is_fatal());
    }
}
