//! The [gasp](https://learn.microsoft.com/en-us/typography/opentype/spec/gasp) table

use alloc::vec::Vec;

use types::{Scalar, Tag};

use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

bitflags::bitflags! {
    /// Rasterization behavior for a range of sizes.
    #[derive(Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct GaspRangeBehavior: u16 {
        /// Use gridfitting.
        const GASP_GRIDFIT = 0x0001;
        /// Use grayscale rendering.
        const GASP_DOGRAY = 0x0002;
        /// Use gridfitting with ClearType symmetric smoothing. Only
        /// supported in version 1.
        const GASP_SYMMETRIC_GRIDFIT = 0x0004;
        /// Use smoothing along multiple axes with ClearType. Only
        /// supported in version 1.
        const GASP_SYMMETRIC_SMOOTHING = 0x0008;
    }
}

impl Scalar for GaspRangeBehavior {
    type Raw = [u8; 2];

    fn from_raw(raw: [u8; 2]) -> Self {
        Self::from_bits_truncate(u16::from_raw(raw))
    }

    fn to_raw(self) -> [u8; 2] {
        self.bits().to_raw()
    }
}

/// One size range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaspRange {
    /// Upper limit of the range, in PPEM.
    pub range_max_ppem: u16,
    pub range_gasp_behavior: GaspRangeBehavior,
}

/// The [gasp](https://learn.microsoft.com/en-us/typography/opentype/spec/gasp) (Grid-fitting and Scan-conversion Procedure) table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gasp {
    pub version: u16,
    ranges: Vec<GaspRange>,
}

impl TopLevelTable for Gasp {
    const TAG: Tag = tags::GASP;
}

impl FontRead for Gasp {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let num_ranges: u16 = cursor.read()?;
        let mut ranges = Vec::with_capacity(num_ranges as usize);
        for _ in 0..num_ranges {
            ranges.push(GaspRange {
                range_max_ppem: cursor.read()?,
                range_gasp_behavior: cursor.read()?,
            });
        }
        Ok(Gasp { version, ranges })
    }
}

impl Gasp {
    /// Ranges sorted by increasing `range_max_ppem`.
    pub fn ranges(&self) -> &[GaspRange] {
        &self.ranges
    }

    /// The behavior for a size, from the first range that covers it.
    pub fn behavior(&self, ppem: u16) -> Option<GaspRangeBehavior> {
        self.ranges
            .iter()
            .find(|range| ppem <= range.range_max_ppem)
            .map(|range| range.range_gasp_behavior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::be_buffer;

    #[test]
    fn ranges() {
        let buf = be_buffer! { 1u16, 2u16, 8u16, 0x000Au16, 0xFFFFu16, 0x000Fu16 };
        let gasp = Gasp::read(FontData::new(&buf)).unwrap();
        assert_eq!(gasp.version, 1);
        assert_eq!(gasp.ranges().len(), 2);
        assert_eq!(
            gasp.behavior(8),
            Some(GaspRangeBehavior::GASP_DOGRAY | GaspRangeBehavior::GASP_SYMMETRIC_SMOOTHING)
        );
        assert_eq!(gasp.behavior(9), Some(GaspRangeBehavior::all()));
    }
}
