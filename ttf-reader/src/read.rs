//! Traits for interpreting font data

use types::Tag;

use crate::{FontData, ReadError};

/// A type that can be read from raw table data.
///
/// This is implemented for every table that is self-describing: that is,
/// tables that need no other table in order to interpret their bytes.
/// (`loca`, `hmtx` and `glyf` are read in two steps instead; see
/// [`RawLoca`](crate::tables::loca::RawLoca) and friends.)
pub trait FontRead: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    ///
    /// Versioned fields are read only when the version (and, for some
    /// tables, the available length) says they are present.
    fn read(data: FontData<'_>) -> Result<Self, ReadError>;
}

/// A table that has an associated tag.
pub trait TopLevelTable {
    /// The table's tag.
    const TAG: Tag;
}
