//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{BoundingBox, Fixed, LongDateTime, MajorMinor, Tag};

use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

/// The value of [`Head::magic_number`] in every valid font.
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
/// (font header) table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Head {
    pub version: MajorMinor,
    pub font_revision: Fixed,
    pub checksum_adjustment: u32,
    pub magic_number: u32,
    pub flags: u16,
    /// Set to a value from 16 to 16384.
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    /// Smallest readable size in pixels.
    pub lowest_rec_ppem: u16,
    /// Deprecated (Set to 2).
    pub font_direction_hint: i16,
    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub index_to_loc_format: i16,
    /// 0 for current format.
    pub glyph_data_format: i16,
}

impl Head {
    /// `true` if `loca` stores 16-bit offsets.
    pub fn is_short_loca(&self) -> bool {
        self.index_to_loc_format == 0
    }

    /// The bounding box of every glyph, in font units.
    pub fn bounding_box(&self) -> BoundingBox<i16> {
        BoundingBox {
            x_min: self.x_min,
            y_min: self.y_min,
            x_max: self.x_max,
            y_max: self.y_max,
        }
    }
}

impl TopLevelTable for Head {
    const TAG: Tag = tags::HEAD;
}

impl FontRead for Head {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let head = Head {
            version: cursor.read()?,
            font_revision: cursor.read()?,
            checksum_adjustment: cursor.read()?,
            magic_number: cursor.read()?,
            flags: cursor.read()?,
            units_per_em: cursor.read()?,
            created: cursor.read()?,
            modified: cursor.read()?,
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
            mac_style: cursor.read()?,
            lowest_rec_ppem: cursor.read()?,
            font_direction_hint: cursor.read()?,
            index_to_loc_format: cursor.read()?,
            glyph_data_format: cursor.read()?,
        };
        if head.magic_number != MAGIC_NUMBER {
            return Err(ReadError::MalformedData("bad magic number in head"));
        }
        Ok(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::{bebuffer::BeBuffer, tables};

    #[test]
    fn smoke_test() {
        let buf = tables::head(2048, 1);
        assert_eq!(buf.len(), 54);
        let head = Head::read(FontData::new(&buf)).unwrap();
        assert_eq!(head.version, MajorMinor::VERSION_1_0);
        assert_eq!(head.font_revision, Fixed::from_f64(2.5));
        assert_eq!(head.checksum_adjustment, 0x1234_5678);
        assert_eq!(head.flags, 0x000B);
        assert_eq!(head.units_per_em, 2048);
        assert_eq!(head.created.as_secs(), 3600);
        assert_eq!(head.modified.as_secs(), 7200);
        assert_eq!(
            head.bounding_box(),
            BoundingBox {
                x_min: -20,
                y_min: -250,
                x_max: 1100,
                y_max: 900
            }
        );
        assert_eq!(head.mac_style, 1);
        assert_eq!(head.lowest_rec_ppem, 8);
        assert_eq!(head.font_direction_hint, 2);
        assert_eq!(head.index_to_loc_format, 1);
        assert!(!head.is_short_loca());
        assert_eq!(head.glyph_data_format, 0);
    }

    #[test]
    fn truncated() {
        let buf = tables::head(1000, 0);
        assert_eq!(
            Head::read(FontData::new(&buf[..53])),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn bad_magic() {
        let buf = BeBuffer::new()
            .extend([1u16, 0])
            .push(Fixed::ONE)
            .extend([0u32, 0xDEAD_BEEF])
            .extend([0u8; 42]);
        assert!(matches!(
            Head::read(FontData::new(&buf)),
            Err(ReadError::MalformedData(_))
        ));
    }
}
