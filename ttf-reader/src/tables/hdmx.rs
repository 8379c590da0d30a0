//! The [Horizontal Device Metrics](https://learn.microsoft.com/en-us/typography/opentype/spec/hdmx) table

use alloc::vec::Vec;

use types::Tag;

use crate::{tags, FontData, ReadError, TopLevelTable};

/// The undecoded bytes of an `hdmx` table.
///
/// Each device record holds one width per glyph, so the table can only be
/// read once `maxp` is known.
#[derive(Clone, Debug)]
pub struct RawHdmx {
    data: Vec<u8>,
}

impl RawHdmx {
    pub fn new(data: Vec<u8>) -> Self {
        RawHdmx { data }
    }

    /// Read every device record, each with `num_glyphs` widths.
    pub fn initialize(self, num_glyphs: u16) -> Result<Hdmx, ReadError> {
        let data = FontData::new(&self.data);
        let mut cursor = data.cursor();
        let version: u16 = cursor.read()?;
        let num_records: u16 = cursor.read()?;
        let size_device_record: u32 = cursor.read()?;
        // records are padded, but never shorter than their widths
        if (size_device_record as usize) < num_glyphs as usize + 2 && num_records > 0 {
            return Err(ReadError::MalformedData(
                "hdmx device record shorter than its widths",
            ));
        }

        let mut records = Vec::with_capacity(num_records as usize);
        for i in 0..num_records as usize {
            let offset = (size_device_record as usize)
                .checked_mul(i)
                .and_then(|pos| pos.checked_add(cursor.position()))
                .ok_or(ReadError::OutOfBounds)?;
            let mut record = data.cursor_at(offset);
            records.push(DeviceRecord {
                pixel_size: record.read()?,
                max_width: record.read()?,
                widths: record.read_bytes(num_glyphs as usize)?.to_vec(),
            });
        }
        Ok(Hdmx {
            version,
            size_device_record,
            records,
        })
    }
}

/// The [hdmx (Horizontal Device Metrics)](https://learn.microsoft.com/en-us/typography/opentype/spec/hdmx) table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hdmx {
    pub version: u16,
    /// Size of a device record, 32-bit aligned.
    pub size_device_record: u32,
    records: Vec<DeviceRecord>,
}

/// Integer advance widths of every glyph at one pixel size.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceRecord {
    /// Pixel size for following widths (as ppem).
    pub pixel_size: u8,
    pub max_width: u8,
    /// Widths, indexed by glyph id.
    pub widths: Vec<u8>,
}

impl TopLevelTable for Hdmx {
    const TAG: Tag = tags::HDMX;
}

impl Hdmx {
    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    pub fn num_records(&self) -> u16 {
        self.records.len() as u16
    }

    /// The device record that exactly matches `size` (as ppem).
    ///
    /// Records are sorted by pixel size.
    pub fn record_for_size(&self, size: u8) -> Option<&DeviceRecord> {
        self.records
            .binary_search_by_key(&size, |record| record.pixel_size)
            .ok()
            .and_then(|idx| self.records.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::tables;

    fn hdmx() -> Hdmx {
        let buf = tables::hdmx(&[
            (8, 13, &[10, 12, 13]),
            (16, 21, &[18, 20, 21]),
            (32, 52, &[38, 40, 52]),
        ]);
        RawHdmx::new(buf.into_vec()).initialize(3).unwrap()
    }

    #[test]
    fn read_hdmx() {
        let hdmx = hdmx();
        assert_eq!(hdmx.version, 0);
        assert_eq!(hdmx.num_records(), 3);
        // 5 bytes per record, padded to 8
        assert_eq!(hdmx.size_device_record, 8);
        assert_eq!(
            hdmx.records()[1],
            DeviceRecord {
                pixel_size: 16,
                max_width: 21,
                widths: vec![18, 20, 21],
            }
        );
        assert_eq!(hdmx.records()[2].widths, [38, 40, 52]);
    }

    #[test]
    fn find_by_size() {
        let hdmx = hdmx();
        assert_eq!(hdmx.record_for_size(8).unwrap().max_width, 13);
        assert_eq!(hdmx.record_for_size(32).unwrap().widths, [38, 40, 52]);
        assert!(hdmx.record_for_size(7).is_none());
        assert!(hdmx.record_for_size(20).is_none());
        assert!(hdmx.record_for_size(72).is_none());
    }

    #[test]
    fn more_glyphs_than_widths() {
        let buf = tables::hdmx(&[(8, 13, &[10, 12, 13])]);
        let result = RawHdmx::new(buf.into_vec()).initialize(7);
        assert!(matches!(result, Err(ReadError::MalformedData(_))));
    }

    #[test]
    fn truncated_record() {
        let mut bytes = tables::hdmx(&[(8, 13, &[10, 12, 13]), (9, 14, &[11, 13, 14])]).into_vec();
        bytes.truncate(bytes.len() - 6);
        let result = RawHdmx::new(bytes).initialize(3);
        assert_eq!(result, Err(ReadError::OutOfBounds));
    }
}
