//! The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::{Tag, Version16Dot16};

use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

/// [`maxp`](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maxp {
    /// The version: 0x00005000 for version 0.5, 0x00010000 for version 1.0.
    pub version: Version16Dot16,
    /// The number of glyphs in the font.
    pub num_glyphs: u16,
    /// Limits used by TrueType outlines; present only in version 1.0.
    pub truetype: Option<MaxpV1>,
}

/// The fields added in version 1.0 of `maxp`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaxpV1 {
    /// Maximum points in a non-composite glyph.
    pub max_points: u16,
    /// Maximum contours in a non-composite glyph.
    pub max_contours: u16,
    /// Maximum points in a composite glyph.
    pub max_composite_points: u16,
    /// Maximum contours in a composite glyph.
    pub max_composite_contours: u16,
    /// 1 if instructions do not use the twilight zone (Z0), or 2 if
    /// instructions do use Z0; should be set to 2 in most cases.
    pub max_zones: u16,
    /// Maximum points used in Z0.
    pub max_twilight_points: u16,
    /// Number of Storage Area locations.
    pub max_storage: u16,
    /// Number of FDEFs, equal to the highest function number + 1.
    pub max_function_defs: u16,
    /// Number of IDEFs.
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    /// Maximum byte count for glyph instructions.
    pub max_size_of_instructions: u16,
    /// Maximum number of components referenced at “top level” for any
    /// composite glyph.
    pub max_component_elements: u16,
    /// Maximum levels of recursion; 1 for simple components.
    pub max_component_depth: u16,
}

impl TopLevelTable for Maxp {
    const TAG: Tag = tags::MAXP;
}

impl FontRead for Maxp {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: Version16Dot16 = cursor.read()?;
        let num_glyphs = cursor.read()?;
        let truetype = if version == Version16Dot16::VERSION_1_0 {
            Some(MaxpV1 {
                max_points: cursor.read()?,
                max_contours: cursor.read()?,
                max_composite_points: cursor.read()?,
                max_composite_contours: cursor.read()?,
                max_zones: cursor.read()?,
                max_twilight_points: cursor.read()?,
                max_storage: cursor.read()?,
                max_function_defs: cursor.read()?,
                max_instruction_defs: cursor.read()?,
                max_stack_elements: cursor.read()?,
                max_size_of_instructions: cursor.read()?,
                max_component_elements: cursor.read()?,
                max_component_depth: cursor.read()?,
            })
        } else {
            None
        };
        Ok(Maxp {
            version,
            num_glyphs,
            truetype,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::tables;

    #[test]
    fn version_0_5() {
        let buf = tables::maxp(12);
        let maxp = Maxp::read(FontData::new(&buf)).unwrap();
        assert_eq!(maxp.version, Version16Dot16::VERSION_0_5);
        assert_eq!(maxp.num_glyphs, 12);
        assert!(maxp.truetype.is_none());
    }

    #[test]
    fn version_1_0() {
        let buf = tables::maxp_v1(300);
        assert_eq!(buf.len(), 32);
        let maxp = Maxp::read(FontData::new(&buf)).unwrap();
        assert_eq!(maxp.num_glyphs, 300);
        let v1 = maxp.truetype.unwrap();
        assert_eq!(v1.max_points, 1);
        assert_eq!(v1.max_zones, 5);
        assert_eq!(v1.max_stack_elements, 10);
        assert_eq!(v1.max_component_depth, 13);
        // a 1.0 table missing its trailing fields is truncated
        assert!(Maxp::read(FontData::new(&buf[..30])).is_err());
    }
}
