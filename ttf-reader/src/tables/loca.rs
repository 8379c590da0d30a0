//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use alloc::vec::Vec;
use core::ops::Range;

use types::{GlyphId, Tag};

use crate::{tags, FontData, ReadError, TopLevelTable};

/// The undecoded bytes of a `loca` table.
///
/// The layout of the offsets depends on `head` and their number on `maxp`,
/// so the table is resolved by [`RawLoca::initialize`] once those are known.
#[derive(Clone, Debug)]
pub struct RawLoca {
    data: Vec<u8>,
}

impl RawLoca {
    pub fn new(data: Vec<u8>) -> Self {
        RawLoca { data }
    }

    /// Read `num_glyphs + 1` offsets.
    ///
    /// Short offsets are stored halved, and are doubled here.
    pub fn initialize(self, num_glyphs: u16, is_short: bool) -> Result<Loca, ReadError> {
        let data = FontData::new(&self.data);
        let count = num_glyphs as usize + 1;
        let offsets = if is_short {
            data.read_array::<u16>(0, count)?
                .into_iter()
                .map(|offset| offset as u32 * 2)
                .collect()
        } else {
            data.read_array::<u32>(0, count)?
        };
        Ok(Loca { offsets, is_short })
    }
}

/// The [loca] table.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loca {
    offsets: Vec<u32>,
    is_short: bool,
}

impl TopLevelTable for Loca {
    const TAG: Tag = tags::LOCA;
}

impl Loca {
    /// The number of glyphs covered; one less than the number of offsets.
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if the offsets were stored as halved u16s.
    pub fn is_short(&self) -> bool {
        self.is_short
    }

    /// The multiplier applied to stored offsets: 2 for short, 1 for long.
    pub fn factor(&self) -> u32 {
        if self.is_short {
            2
        } else {
            1
        }
    }

    /// The resolved offset at `idx`, into the `glyf` table.
    pub fn offset(&self, idx: usize) -> Option<u32> {
        self.offsets.get(idx).copied()
    }

    /// All offsets, including the final end offset.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// The length of a glyph's data; zero means the glyph has no outline.
    ///
    /// Returns `None` if the glyph is out of range or its offsets decrease.
    pub fn glyph_length(&self, gid: GlyphId) -> Option<u32> {
        let idx = gid.to_usize();
        self.offset(idx + 1)?.checked_sub(self.offset(idx)?)
    }

    /// The byte range of a glyph in the `glyf` table.
    pub fn glyph_range(&self, gid: GlyphId) -> Result<Range<usize>, ReadError> {
        let idx = gid.to_usize();
        let start = self.offset(idx).ok_or(ReadError::OutOfBounds)?;
        let end = self.offset(idx + 1).ok_or(ReadError::OutOfBounds)?;
        if end < start {
            return Err(ReadError::MalformedData("loca offsets are not increasing"));
        }
        Ok(start as usize..end as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::be_buffer;

    #[test]
    fn short_offsets_are_doubled() {
        let buf = be_buffer! { 0u16, 0u16, 15u16, 40u16 };
        let loca = RawLoca::new(buf.into_vec()).initialize(3, true).unwrap();
        assert_eq!(loca.len(), 3);
        assert!(loca.is_short());
        assert_eq!(loca.factor(), 2);
        assert_eq!(loca.offsets(), [0, 0, 30, 80]);
        assert_eq!(loca.glyph_length(GlyphId::new(0)), Some(0));
        assert_eq!(loca.glyph_length(GlyphId::new(1)), Some(30));
        assert_eq!(loca.glyph_range(GlyphId::new(2)), Ok(30..80));
        assert_eq!(loca.glyph_length(GlyphId::new(3)), None);
        for i in 0..loca.len() {
            assert!(loca.offset(i + 1) >= loca.offset(i));
        }
    }

    #[test]
    fn long_offsets() {
        let buf = be_buffer! { 0u32, 0x1_0000u32, 0x1_0010u32 };
        let loca = RawLoca::new(buf.into_vec()).initialize(2, false).unwrap();
        assert_eq!(loca.factor(), 1);
        assert_eq!(loca.offset(1), Some(0x1_0000));
        assert_eq!(loca.glyph_length(GlyphId::new(1)), Some(16));
    }

    #[test]
    fn too_few_offsets() {
        let buf = be_buffer! { 0u16, 4u16 };
        let err = RawLoca::new(buf.into_vec()).initialize(2, true);
        assert_eq!(err, Err(ReadError::OutOfBounds));
    }

    #[test]
    fn decreasing_offsets() {
        let buf = be_buffer! { 0u32, 20u32, 10u32 };
        let loca = RawLoca::new(buf.into_vec()).initialize(2, false).unwrap();
        assert_eq!(loca.glyph_length(GlyphId::new(1)), None);
        assert!(matches!(
            loca.glyph_range(GlyphId::new(1)),
            Err(ReadError::MalformedData(_))
        ));
    }
}
