//! The [os2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use types::Tag;

use crate::{tags, Cursor, FontData, FontRead, ReadError, TopLevelTable};

// byte lengths at which each group of optional fields ends
const TYPO_METRICS_END: usize = 78;
const CODE_PAGE_END: usize = 86;
const VERSION_2_END: usize = 96;
const VERSION_5_END: usize = 100;

/// The ten byte PANOSE classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Panose {
    pub family_type: u8,
    pub serif_style: u8,
    pub weight: u8,
    pub proportion: u8,
    pub contrast: u8,
    pub stroke_variation: u8,
    pub arm_style: u8,
    pub letterform: u8,
    pub midline: u8,
    pub x_height: u8,
}

impl Panose {
    pub fn from_bytes(bytes: [u8; 10]) -> Self {
        let [family_type, serif_style, weight, proportion, contrast, stroke_variation, arm_style, letterform, midline, x_height] = bytes;
        Panose {
            family_type,
            serif_style,
            weight,
            proportion,
            contrast,
            stroke_variation,
            arm_style,
            letterform,
            midline,
            x_height,
        }
    }

    pub fn to_bytes(self) -> [u8; 10] {
        [
            self.family_type,
            self.serif_style,
            self.weight,
            self.proportion,
            self.contrast,
            self.stroke_variation,
            self.arm_style,
            self.letterform,
            self.midline,
            self.x_height,
        ]
    }
}

/// [`OS/2`](https://docs.microsoft.com/en-us/typography/opentype/spec/os2)
///
/// Fields added after version 0 are `None` when the version, or the length
/// of the table, says they are absent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Os2 {
    pub version: u16,
    pub x_avg_char_width: i16,
    pub us_weight_class: u16,
    pub us_width_class: u16,
    pub fs_type: u16,
    pub y_subscript_x_size: i16,
    pub y_subscript_y_size: i16,
    pub y_subscript_x_offset: i16,
    pub y_subscript_y_offset: i16,
    pub y_superscript_x_size: i16,
    pub y_superscript_y_size: i16,
    pub y_superscript_x_offset: i16,
    pub y_superscript_y_offset: i16,
    pub y_strikeout_size: i16,
    pub y_strikeout_position: i16,
    pub s_family_class: i16,
    pub panose: Panose,
    pub ul_unicode_range_1: u32,
    pub ul_unicode_range_2: u32,
    pub ul_unicode_range_3: u32,
    pub ul_unicode_range_4: u32,
    /// Font Vendor Identification.
    pub ach_vend_id: Tag,
    pub fs_selection: u16,
    pub us_first_char_index: u16,
    pub us_last_char_index: u16,
    pub s_typo_ascender: Option<i16>,
    pub s_typo_descender: Option<i16>,
    pub s_typo_line_gap: Option<i16>,
    pub us_win_ascent: Option<u16>,
    pub us_win_descent: Option<u16>,
    pub ul_code_page_range_1: Option<u32>,
    pub ul_code_page_range_2: Option<u32>,
    pub sx_height: Option<i16>,
    pub s_cap_height: Option<i16>,
    pub us_default_char: Option<u16>,
    pub us_break_char: Option<u16>,
    pub us_max_context: Option<u16>,
    pub us_lower_optical_point_size: Option<u16>,
    pub us_upper_optical_point_size: Option<u16>,
}

impl TopLevelTable for Os2 {
    const TAG: Tag = tags::OS_2;
}

fn read_if<T: types::Scalar>(
    cursor: &mut Cursor<'_>,
    present: bool,
) -> Result<Option<T>, ReadError> {
    present.then(|| cursor.read()).transpose()
}

impl FontRead for Os2 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let x_avg_char_width = cursor.read()?;
        let us_weight_class = cursor.read()?;
        let us_width_class = cursor.read()?;
        let fs_type = cursor.read()?;
        let y_subscript_x_size = cursor.read()?;
        let y_subscript_y_size = cursor.read()?;
        let y_subscript_x_offset = cursor.read()?;
        let y_subscript_y_offset = cursor.read()?;
        let y_superscript_x_size = cursor.read()?;
        let y_superscript_y_size = cursor.read()?;
        let y_superscript_x_offset = cursor.read()?;
        let y_superscript_y_offset = cursor.read()?;
        let y_strikeout_size = cursor.read()?;
        let y_strikeout_position = cursor.read()?;
        let s_family_class = cursor.read()?;
        let panose = Panose::from_bytes(cursor.read()?);
        let ul_unicode_range_1 = cursor.read()?;
        let ul_unicode_range_2 = cursor.read()?;
        let ul_unicode_range_3 = cursor.read()?;
        let ul_unicode_range_4 = cursor.read()?;
        let ach_vend_id = cursor.read()?;
        let fs_selection = cursor.read()?;
        let us_first_char_index = cursor.read()?;
        let us_last_char_index = cursor.read()?;

        let len = data.len();
        let has_typo = len >= TYPO_METRICS_END;
        let has_code_page = version >= 1 && len >= CODE_PAGE_END;
        let has_v2 = version >= 2 && len >= VERSION_2_END;
        let has_v5 = version >= 5 && len >= VERSION_5_END;
        Ok(Os2 {
            version,
            x_avg_char_width,
            us_weight_class,
            us_width_class,
            fs_type,
            y_subscript_x_size,
            y_subscript_y_size,
            y_subscript_x_offset,
            y_subscript_y_offset,
            y_superscript_x_size,
            y_superscript_y_size,
            y_superscript_x_offset,
            y_superscript_y_offset,
            y_strikeout_size,
            y_strikeout_position,
            s_family_class,
            panose,
            ul_unicode_range_1,
            ul_unicode_range_2,
            ul_unicode_range_3,
            ul_unicode_range_4,
            ach_vend_id,
            fs_selection,
            us_first_char_index,
            us_last_char_index,
            s_typo_ascender: read_if(&mut cursor, has_typo)?,
            s_typo_descender: read_if(&mut cursor, has_typo)?,
            s_typo_line_gap: read_if(&mut cursor, has_typo)?,
            us_win_ascent: read_if(&mut cursor, has_typo)?,
            us_win_descent: read_if(&mut cursor, has_typo)?,
            ul_code_page_range_1: read_if(&mut cursor, has_code_page)?,
            ul_code_page_range_2: read_if(&mut cursor, has_code_page)?,
            sx_height: read_if(&mut cursor, has_v2)?,
            s_cap_height: read_if(&mut cursor, has_v2)?,
            us_default_char: read_if(&mut cursor, has_v2)?,
            us_break_char: read_if(&mut cursor, has_v2)?,
            us_max_context: read_if(&mut cursor, has_v2)?,
            us_lower_optical_point_size: read_if(&mut cursor, has_v5)?,
            us_upper_optical_point_size: read_if(&mut cursor, has_v5)?,
        })
    }
}
