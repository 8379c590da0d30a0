//! The [kern](https://learn.microsoft.com/en-us/typography/opentype/spec/kern) table

use alloc::vec::Vec;

use types::{GlyphId, Tag};

use crate::{tags, Cursor, FontData, FontRead, ReadError, TopLevelTable};

const SUBTABLE_HEADER_LEN: usize = 6;

/// The [kern](https://learn.microsoft.com/en-us/typography/opentype/spec/kern) table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kern {
    pub version: u16,
    subtables: Vec<KernSubtable>,
}

impl TopLevelTable for Kern {
    const TAG: Tag = tags::KERN;
}

impl FontRead for Kern {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let n_tables: u16 = cursor.read()?;
        let mut subtables = Vec::with_capacity(n_tables as usize);
        for _ in 0..n_tables {
            let start = cursor.position();
            let subtable_data = data.split_off(start).ok_or(ReadError::OutOfBounds)?;
            let subtable = KernSubtable::read(subtable_data)?;
            // the declared length is authoritative for where the next
            // subtable starts
            cursor.advance_by((subtable.length as usize).max(SUBTABLE_HEADER_LEN));
            subtables.push(subtable);
        }
        Ok(Kern { version, subtables })
    }
}

impl Kern {
    pub fn subtables(&self) -> &[KernSubtable] {
        &self.subtables
    }

    /// The kerning adjustment for a pair, from the first format 0
    /// horizontal subtable that has one.
    pub fn kern_value(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        self.subtables
            .iter()
            .filter(|subtable| subtable.is_horizontal())
            .find_map(|subtable| subtable.kern_value(left, right))
    }
}

/// A single kerning subtable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernSubtable {
    pub version: u16,
    /// Length of the subtable, including this header.
    pub length: u16,
    /// The format in the high byte, and coverage bits in the low byte.
    pub coverage: u16,
    pub kind: KernSubtableKind,
}

/// The body of a kerning subtable, by format.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KernSubtableKind {
    Format0(Kern0),
    Format2(Kern2),
    /// A format with no decoder.
    Unsupported { format: u16 },
}

impl KernSubtable {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let length = cursor.read()?;
        let coverage: u16 = cursor.read()?;
        let kind = match coverage >> 8 {
            0 => KernSubtableKind::Format0(Kern0::read(&mut cursor)?),
            2 => KernSubtableKind::Format2(Kern2::read(&mut cursor)?),
            format => KernSubtableKind::Unsupported { format },
        };
        Ok(KernSubtable {
            version,
            length,
            coverage,
            kind,
        })
    }

    pub fn format(&self) -> u16 {
        self.coverage >> 8
    }

    /// Bit 0: the table has horizontal data.
    pub fn is_horizontal(&self) -> bool {
        self.coverage & 0x0001 != 0
    }

    /// Bit 1: the table has minimum values, rather than kerning values.
    pub fn is_minimum(&self) -> bool {
        self.coverage & 0x0002 != 0
    }

    /// Bit 2: kerning is perpendicular to the flow of the text.
    pub fn is_cross_stream(&self) -> bool {
        self.coverage & 0x0004 != 0
    }

    /// Bit 3: the values replace those accumulated so far.
    pub fn is_override(&self) -> bool {
        self.coverage & 0x0008 != 0
    }

    /// `false` for formats whose values cannot be looked up.
    pub fn is_supported(&self) -> bool {
        matches!(self.kind, KernSubtableKind::Format0(_))
    }

    /// The number of kerning pairs; 0 for formats other than 0.
    pub fn kerning_count(&self) -> usize {
        match &self.kind {
            KernSubtableKind::Format0(table) => table.pairs.len(),
            _ => 0,
        }
    }

    /// The pair at `idx`, in file order.
    pub fn kerning(&self, idx: usize) -> Option<&KerningPair> {
        match &self.kind {
            KernSubtableKind::Format0(table) => table.pairs.get(idx),
            _ => None,
        }
    }

    pub fn kern_value(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        match &self.kind {
            KernSubtableKind::Format0(table) => table.kern_value(left, right),
            _ => None,
        }
    }
}

/// A kerning adjustment for one pair of glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KerningPair {
    pub left: GlyphId,
    pub right: GlyphId,
    /// In font units.
    pub value: i16,
}

/// Format 0: an ordered list of kerning pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kern0 {
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
    pairs: Vec<KerningPair>,
}

impl Kern0 {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, ReadError> {
        let n_pairs: u16 = cursor.read()?;
        let search_range = cursor.read()?;
        let entry_selector = cursor.read()?;
        let range_shift = cursor.read()?;
        let mut pairs = Vec::with_capacity(n_pairs as usize);
        for _ in 0..n_pairs {
            pairs.push(KerningPair {
                left: cursor.read()?,
                right: cursor.read()?,
                value: cursor.read()?,
            });
        }
        Ok(Kern0 {
            search_range,
            entry_selector,
            range_shift,
            pairs,
        })
    }

    pub fn pairs(&self) -> &[KerningPair] {
        &self.pairs
    }

    pub fn kern_value(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        self.pairs
            .iter()
            .find(|pair| pair.left == left && pair.right == right)
            .map(|pair| pair.value)
    }
}

/// Format 2: a class based two dimensional array.
///
/// Offsets are kept, but values are not looked up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kern2 {
    /// The width, in bytes, of a row in the kerning value array.
    pub row_width: u16,
    /// Offset from the start of the subtable to the left class table.
    pub left_class_offset: u16,
    /// Offset from the start of the subtable to the right class table.
    pub right_class_offset: u16,
    /// Offset from the start of the subtable to the kerning value array.
    pub array_offset: u16,
}

impl Kern2 {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, ReadError> {
        Ok(Kern2 {
            row_width: cursor.read()?,
            left_class_offset: cursor.read()?,
            right_class_offset: cursor.read()?,
            array_offset: cursor.read()?,
        })
    }
}
