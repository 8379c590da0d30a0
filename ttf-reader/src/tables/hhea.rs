//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use types::{FWord, MajorMinor, Tag, UfWord};

use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

/// [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea)
/// Horizontal Header Table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hhea {
    pub version: MajorMinor,
    /// Typographic ascent.
    pub ascender: FWord,
    /// Typographic descent.
    pub descender: FWord,
    /// Typographic line gap.
    pub line_gap: FWord,
    /// Maximum advance width value in 'hmtx' table.
    pub advance_width_max: UfWord,
    pub min_left_side_bearing: FWord,
    pub min_right_side_bearing: FWord,
    /// Max(lsb + (xMax - xMin)).
    pub x_max_extent: FWord,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    /// 0 for current format.
    pub metric_data_format: i16,
    /// Number of hMetric entries in 'hmtx' table
    pub number_of_h_metrics: u16,
}

impl TopLevelTable for Hhea {
    const TAG: Tag = tags::HHEA;
}

impl FontRead for Hhea {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let ascender = cursor.read()?;
        let descender = cursor.read()?;
        let line_gap = cursor.read()?;
        let advance_width_max = cursor.read()?;
        let min_left_side_bearing = cursor.read()?;
        let min_right_side_bearing = cursor.read()?;
        let x_max_extent = cursor.read()?;
        let caret_slope_rise = cursor.read()?;
        let caret_slope_run = cursor.read()?;
        let caret_offset = cursor.read()?;
        // four reserved i16s
        cursor.advance_by(8);
        let metric_data_format = cursor.read()?;
        let number_of_h_metrics = cursor.read()?;
        Ok(Hhea {
            version,
            ascender,
            descender,
            line_gap,
            advance_width_max,
            min_left_side_bearing,
            min_right_side_bearing,
            x_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            metric_data_format,
            number_of_h_metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::tables;

    #[test]
    fn read_all_fields() {
        let buf = tables::hhea(800, -200, 3);
        assert_eq!(buf.len(), 36);
        let hhea = Hhea::read(FontData::new(&buf)).unwrap();
        assert_eq!(hhea.version, MajorMinor::VERSION_1_0);
        assert_eq!(hhea.ascender, FWord::new(800));
        assert_eq!(hhea.descender, FWord::new(-200));
        assert_eq!(hhea.line_gap, FWord::new(90));
        assert_eq!(hhea.advance_width_max, UfWord::new(1200));
        assert_eq!(hhea.min_left_side_bearing, FWord::new(-20));
        assert_eq!(hhea.min_right_side_bearing, FWord::new(-30));
        assert_eq!(hhea.x_max_extent, FWord::new(1150));
        assert_eq!(hhea.caret_slope_rise, 1);
        assert_eq!(hhea.caret_slope_run, 0);
        assert_eq!(hhea.metric_data_format, 0);
        assert_eq!(hhea.number_of_h_metrics, 3);
    }

    #[test]
    fn missing_metric_count() {
        let buf = tables::hhea(800, -200, 3);
        assert!(Hhea::read(FontData::new(&buf[..35])).is_err());
    }
}
