//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use alloc::vec::Vec;

use types::{GlyphId, Tag};

use crate::{tags, FontData, ReadError, TopLevelTable};

/// The undecoded bytes of an `hmtx` table.
///
/// The number of metrics comes from `hhea` and the number of glyphs from
/// `maxp`; [`RawHmtx::initialize`] resolves the table once both are known.
#[derive(Clone, Debug)]
pub struct RawHmtx {
    data: Vec<u8>,
}

impl RawHmtx {
    pub fn new(data: Vec<u8>) -> Self {
        RawHmtx { data }
    }

    /// Read `number_of_h_metrics` long metrics followed by
    /// `num_extra_bearings` left side bearings.
    pub fn initialize(
        self,
        number_of_h_metrics: u16,
        num_extra_bearings: u16,
    ) -> Result<Hmtx, ReadError> {
        let mut cursor = FontData::new(&self.data).cursor();
        let mut h_metrics = Vec::with_capacity(number_of_h_metrics as usize);
        for _ in 0..number_of_h_metrics {
            h_metrics.push(LongMetric {
                advance: cursor.read()?,
                side_bearing: cursor.read()?,
            });
        }
        let left_side_bearings = cursor.read_array(num_extra_bearings as usize)?;
        Ok(Hmtx {
            h_metrics,
            left_side_bearings,
        })
    }
}

/// A glyph's advance width and left side bearing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LongMetric {
    /// Advance width, in font design units.
    pub advance: u16,
    /// Glyph left side bearing, in font design units.
    pub side_bearing: i16,
}

/// The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hmtx {
    h_metrics: Vec<LongMetric>,
    left_side_bearings: Vec<i16>,
}

impl TopLevelTable for Hmtx {
    const TAG: Tag = tags::HMTX;
}

impl Hmtx {
    /// Paired advance width and left side bearing values for each glyph.
    pub fn h_metrics(&self) -> &[LongMetric] {
        &self.h_metrics
    }

    /// Left side bearings for glyph IDs greater than or equal to
    /// `number_of_h_metrics`.
    pub fn left_side_bearings(&self) -> &[i16] {
        &self.left_side_bearings
    }

    pub fn number_of_h_metrics(&self) -> u16 {
        self.h_metrics.len() as u16
    }

    /// The advance width of a glyph.
    ///
    /// Glyphs past the end of the long metrics share the last advance.
    pub fn advance_width(&self, gid: GlyphId) -> u16 {
        let idx = gid.to_usize();
        self.h_metrics
            .get(idx)
            .or_else(|| self.h_metrics.last())
            .map(|metric| metric.advance)
            .unwrap_or(0)
    }

    /// The left side bearing of a glyph.
    ///
    /// Glyphs past the end of the long metrics read from the trailing
    /// bearing array, falling back to the last long metric.
    pub fn left_side_bearing(&self, gid: GlyphId) -> i16 {
        let idx = gid.to_usize();
        if let Some(metric) = self.h_metrics.get(idx) {
            return metric.side_bearing;
        }
        let Some(last) = self.h_metrics.last() else {
            return 0;
        };
        self.left_side_bearings
            .get(idx - self.h_metrics.len())
            .copied()
            .unwrap_or(last.side_bearing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::tables;

    fn hmtx(metrics: &[(u16, i16)], tail: &[i16]) -> Hmtx {
        let buf = tables::hmtx(metrics, tail);
        RawHmtx::new(buf.into_vec())
            .initialize(metrics.len() as u16, tail.len() as u16)
            .unwrap()
    }

    #[test]
    fn monospaced_tail() {
        let hmtx = hmtx(&[(500, 10), (600, -5)], &[7, 8]);
        assert_eq!(hmtx.number_of_h_metrics(), 2);
        assert_eq!(hmtx.advance_width(GlyphId::new(0)), 500);
        assert_eq!(hmtx.left_side_bearing(GlyphId::new(1)), -5);
        for gid in 2..6 {
            assert_eq!(hmtx.advance_width(GlyphId::new(gid)), 600);
        }
        assert_eq!(hmtx.left_side_bearing(GlyphId::new(2)), 7);
        assert_eq!(hmtx.left_side_bearing(GlyphId::new(3)), 8);
        // past the tail
        assert_eq!(hmtx.left_side_bearing(GlyphId::new(4)), -5);
    }

    #[test]
    fn no_metrics() {
        let hmtx = hmtx(&[], &[]);
        assert_eq!(hmtx.advance_width(GlyphId::new(0)), 0);
        assert_eq!(hmtx.left_side_bearing(GlyphId::new(0)), 0);
    }

    #[test]
    fn truncated_tail() {
        let buf = tables::hmtx(&[(500, 10)], &[1]);
        let result = RawHmtx::new(buf.into_vec()).initialize(1, 2);
        assert_eq!(result, Err(ReadError::OutOfBounds));
    }
}
