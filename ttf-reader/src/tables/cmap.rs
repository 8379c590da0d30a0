//! The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table

use alloc::vec::Vec;

use types::Tag;

use crate::{tags, Cursor, FontData, FontRead, ReadError, TopLevelTable};

/// Platform identifiers used in encoding records.
pub mod platform {
    pub const UNICODE: u16 = 0;
    pub const MACINTOSH: u16 = 1;
    pub const ISO: u16 = 2;
    pub const WINDOWS: u16 = 3;
    pub const CUSTOM: u16 = 4;
}

/// Windows platform encoding identifiers.
pub mod windows_encoding {
    pub const SYMBOL: u16 = 0;
    pub const UNICODE_BMP: u16 = 1;
    pub const SHIFT_JIS: u16 = 2;
    pub const UNICODE_FULL: u16 = 10;
}

/// Macintosh platform encoding identifiers.
pub mod macintosh_encoding {
    pub const ROMAN: u16 = 0;
}

/// An entry of the encoding record list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Offset from the start of the cmap table to the subtable.
    pub subtable_offset: u32,
}

/// The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table
///
/// Each encoding record is paired with its decoded subtable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmap {
    pub version: u16,
    records: Vec<EncodingRecord>,
    subtables: Vec<CmapSubtable>,
}

impl TopLevelTable for Cmap {
    const TAG: Tag = tags::CMAP;
}

impl FontRead for Cmap {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u16 = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let mut records = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            records.push(EncodingRecord {
                platform_id: cursor.read()?,
                encoding_id: cursor.read()?,
                subtable_offset: cursor.read()?,
            });
        }
        let subtables = records
            .iter()
            .map(|record| {
                let subtable_data = data
                    .split_off(record.subtable_offset as usize)
                    .ok_or(ReadError::OutOfBounds)?;
                CmapSubtable::read(subtable_data)
            })
            .collect::<Result<_, _>>()?;
        Ok(Cmap {
            version,
            records,
            subtables,
        })
    }
}

impl Cmap {
    pub fn num_tables(&self) -> usize {
        self.records.len()
    }

    pub fn encoding_records(&self) -> &[EncodingRecord] {
        &self.records
    }

    pub fn subtables(&self) -> &[CmapSubtable] {
        &self.subtables
    }

    /// Encoding records paired with their subtables, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&EncodingRecord, &CmapSubtable)> + '_ {
        self.records.iter().zip(&self.subtables)
    }

    /// The first subtable for the given platform and encoding.
    pub fn format(&self, platform_id: u16, encoding_id: u16) -> Option<&CmapSubtable> {
        self.iter()
            .find(|(record, _)| {
                record.platform_id == platform_id && record.encoding_id == encoding_id
            })
            .map(|(_, subtable)| subtable)
    }

    /// Map a character code to a glyph index, with 0 meaning unmapped.
    ///
    /// Subtables are tried in order of preference: Windows full Unicode,
    /// Windows BMP, any Unicode platform subtable, then the rest in file
    /// order. The first nonzero result wins.
    pub fn map_char_code(&self, code: u32) -> u16 {
        let rank = |record: &EncodingRecord| match (record.platform_id, record.encoding_id) {
            (platform::WINDOWS, windows_encoding::UNICODE_FULL) => 0,
            (platform::WINDOWS, windows_encoding::UNICODE_BMP) => 1,
            (platform::UNICODE, _) => 2,
            _ => 3,
        };
        let mut ordered: Vec<_> = self.iter().collect();
        // slice::sort_by_key is stable
        ordered.sort_by_key(|&(record, _)| rank(record));
        ordered
            .into_iter()
            .map(|(_, subtable)| subtable.map_char_code(code))
            .find(|gid| *gid != 0)
            .unwrap_or(0)
    }
}

/// A decoded character to glyph mapping subtable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CmapSubtable {
    Format0(Cmap0),
    Format2(Cmap2),
    Format4(Cmap4),
    Format6(Cmap6),
    Format8(Cmap8),
    Format10(Cmap10),
    Format12(Cmap12),
    /// A format with no decoder. Maps every code to 0.
    Unsupported { format: u16 },
}

impl CmapSubtable {
    pub fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            0 => Cmap0::read(data).map(Self::Format0),
            2 => Cmap2::read(data).map(Self::Format2),
            4 => Cmap4::read(data).map(Self::Format4),
            6 => Cmap6::read(data).map(Self::Format6),
            8 => Cmap8::read(data).map(Self::Format8),
            10 => Cmap10::read(data).map(Self::Format10),
            12 => Cmap12::read(data).map(Self::Format12),
            format => Ok(Self::Unsupported { format }),
        }
    }

    pub fn format(&self) -> u16 {
        match self {
            Self::Format0(_) => 0,
            Self::Format2(_) => 2,
            Self::Format4(_) => 4,
            Self::Format6(_) => 6,
            Self::Format8(_) => 8,
            Self::Format10(_) => 10,
            Self::Format12(_) => 12,
            Self::Unsupported { format } => *format,
        }
    }

    /// `false` for formats that are parsed but do not map codes.
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            Self::Format2(_) | Self::Format8(_) | Self::Unsupported { .. }
        )
    }

    /// Map a character code to a glyph index, with 0 meaning unmapped.
    pub fn map_char_code(&self, code: u32) -> u16 {
        match self {
            Self::Format0(table) => table.map_char_code(code),
            Self::Format4(table) => table.map_char_code(code),
            Self::Format6(table) => table.map_char_code(code),
            Self::Format10(table) => table.map_char_code(code),
            Self::Format12(table) => table.map_char_code(code),
            Self::Format2(_) | Self::Format8(_) | Self::Unsupported { .. } => 0,
        }
    }
}

/// [cmap Format 0](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-0-byte-encoding-table): Byte encoding table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmap0 {
    pub language: u16,
    glyph_id_array: Vec<u8>,
}

impl Cmap0 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor_at(4);
        let language = cursor.read()?;
        let glyph_id_array = cursor.read_bytes(256)?.to_vec();
        Ok(Cmap0 {
            language,
            glyph_id_array,
        })
    }

    pub fn map_char_code(&self, code: u32) -> u16 {
        self.glyph_id_array
            .get(code as usize)
            .map(|gid| *gid as u16)
            .unwrap_or(0)
    }
}

/// A format 2 sub-header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubHeader {
    pub first_code: u16,
    pub entry_count: u16,
    pub id_delta: i16,
    pub id_range_offset: u16,
}

/// [cmap Format 2](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-2-high-byte-mapping-through-table): High-byte mapping through table
///
/// The structure is decoded, but codes are not mapped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmap2 {
    pub language: u16,
    sub_header_keys: Vec<u16>,
    sub_headers: Vec<SubHeader>,
    glyph_id_array: Vec<u16>,
}

impl Cmap2 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let length = data.read_at::<u16>(2)? as usize;
        let mut cursor = data.cursor_at(4);
        let language = cursor.read()?;
        let sub_header_keys: Vec<u16> = cursor.read_array(256)?;
        // keys are byte offsets into the sub-header array
        let num_sub_headers = sub_header_keys.iter().map(|key| key / 8).max().unwrap_or(0) + 1;
        let mut sub_headers = Vec::with_capacity(num_sub_headers as usize);
        for _ in 0..num_sub_headers {
            sub_headers.push(SubHeader {
                first_code: cursor.read()?,
                entry_count: cursor.read()?,
                id_delta: cursor.read()?,
                id_range_offset: cursor.read()?,
            });
        }
        let array_len = length.saturating_sub(cursor.position()) / 2;
        let array_len = array_len.min(cursor.remaining_bytes() / 2);
        let glyph_id_array = cursor.read_array(array_len)?;
        Ok(Cmap2 {
            language,
            sub_header_keys,
            sub_headers,
            glyph_id_array,
        })
    }

    pub fn sub_header_keys(&self) -> &[u16] {
        &self.sub_header_keys
    }

    pub fn sub_headers(&self) -> &[SubHeader] {
        &self.sub_headers
    }

    pub fn glyph_id_array(&self) -> &[u16] {
        &self.glyph_id_array
    }
}

/// [cmap Format 4](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values): Segment mapping to delta values
///
/// Segments are kept in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmap4 {
    pub language: u16,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
    end_code: Vec<u16>,
    start_code: Vec<u16>,
    id_delta: Vec<i16>,
    id_range_offsets: Vec<u16>,
    glyph_id_array: Vec<u16>,
}

impl Cmap4 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let length = data.read_at::<u16>(2)? as usize;
        let mut cursor = data.cursor_at(4);
        let language = cursor.read()?;
        let seg_count = cursor.read::<u16>()? as usize / 2;
        let search_range = cursor.read()?;
        let entry_selector = cursor.read()?;
        let range_shift = cursor.read()?;
        let end_code = cursor.read_array(seg_count)?;
        cursor.advance::<u16>(); // reservedPad
        let start_code = cursor.read_array(seg_count)?;
        let id_delta = cursor.read_array(seg_count)?;
        let id_range_offsets = cursor.read_array(seg_count)?;
        // the length field is unreliable in the wild; trust it only when
        // it covers the header
        let remaining = cursor.remaining_bytes();
        let array_bytes = match length.checked_sub(cursor.position()) {
            Some(len) if len > 0 => len.min(remaining),
            _ => remaining,
        };
        let glyph_id_array = cursor.read_array(array_bytes / 2)?;
        Ok(Cmap4 {
            language,
            search_range,
            entry_selector,
            range_shift,
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            glyph_id_array,
        })
    }

    pub fn seg_count(&self) -> usize {
        self.end_code.len()
    }

    pub fn end_code(&self) -> &[u16] {
        &self.end_code
    }

    pub fn start_code(&self) -> &[u16] {
        &self.start_code
    }

    pub fn id_delta(&self) -> &[i16] {
        &self.id_delta
    }

    pub fn id_range_offsets(&self) -> &[u16] {
        &self.id_range_offsets
    }

    pub fn glyph_id_array(&self) -> &[u16] {
        &self.glyph_id_array
    }

    /// Map a code through the first segment whose end is not below it.
    pub fn map_char_code(&self, code: u32) -> u16 {
        if code > 0xFFFF {
            return 0;
        }
        let Some(i) = self.end_code.iter().position(|end| *end as u32 >= code) else {
            return 0;
        };
        let start = self.start_code[i] as u32;
        if start > code {
            return 0;
        }
        let delta = self.id_delta[i] as i32;
        let range_offset = self.id_range_offsets[i] as i64;
        if range_offset == 0 {
            return (code as i32).wrapping_add(delta) as u16;
        }
        // idRangeOffset is relative to its own position in the file
        let idx = range_offset / 2 + (code - start) as i64 - (self.seg_count() - i) as i64;
        match usize::try_from(idx)
            .ok()
            .and_then(|idx| self.glyph_id_array.get(idx))
        {
            None | Some(0) => 0,
            Some(gid) => (*gid as i32).wrapping_add(delta) as u16,
        }
    }
}

/// [cmap Format 6](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-6-trimmed-table-mapping): Trimmed table mapping
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmap6 {
    pub language: u16,
    pub first_code: u16,
    glyph_id_array: Vec<u16>,
}

impl Cmap6 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor_at(4);
        let language = cursor.read()?;
        let first_code = cursor.read()?;
        let entry_count = cursor.read::<u16>()? as usize;
        let glyph_id_array = cursor.read_array(entry_count)?;
        Ok(Cmap6 {
            language,
            first_code,
            glyph_id_array,
        })
    }

    pub fn glyph_id_array(&self) -> &[u16] {
        &self.glyph_id_array
    }

    pub fn map_char_code(&self, code: u32) -> u16 {
        code.checked_sub(self.first_code as u32)
            .and_then(|idx| self.glyph_id_array.get(idx as usize))
            .copied()
            .unwrap_or(0)
    }
}

/// A range of codes mapped to a run of glyphs, used by formats 8 and 12.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequentialMapGroup {
    pub start_char_code: u32,
    pub end_char_code: u32,
    pub start_glyph_id: u32,
}

impl SequentialMapGroup {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, ReadError> {
        Ok(SequentialMapGroup {
            start_char_code: cursor.read()?,
            end_char_code: cursor.read()?,
            start_glyph_id: cursor.read()?,
        })
    }
}

fn read_groups(cursor: &mut Cursor<'_>) -> Result<Vec<SequentialMapGroup>, ReadError> {
    let num_groups = cursor.read::<u32>()? as usize;
    // each group is 12 bytes
    if num_groups > cursor.remaining_bytes() / 12 {
        return Err(ReadError::OutOfBounds);
    }
    (0..num_groups)
        .map(|_| SequentialMapGroup::read(cursor))
        .collect()
}

/// [cmap Format 8](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-8-mixed-16-bit-and-32-bit-coverage): mixed 16-bit and 32-bit coverage
///
/// The structure is decoded, but codes are not mapped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmap8 {
    pub language: u32,
    is32: Vec<u8>,
    groups: Vec<SequentialMapGroup>,
}

impl Cmap8 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor_at(8);
        let language = cursor.read()?;
        let is32 = cursor.read_bytes(8192)?.to_vec();
        let groups = read_groups(&mut cursor)?;
        Ok(Cmap8 {
            language,
            is32,
            groups,
        })
    }

    pub fn is32(&self) -> &[u8] {
        &self.is32
    }

    pub fn groups(&self) -> &[SequentialMapGroup] {
        &self.groups
    }
}

/// [cmap Format 10](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-10-trimmed-array): Trimmed array
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmap10 {
    pub language: u32,
    pub start_char_code: u32,
    glyph_id_array: Vec<u16>,
}

impl Cmap10 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor_at(8);
        let language = cursor.read()?;
        let start_char_code = cursor.read()?;
        let num_chars = cursor.read::<u32>()? as usize;
        let glyph_id_array = cursor.read_array(num_chars)?;
        Ok(Cmap10 {
            language,
            start_char_code,
            glyph_id_array,
        })
    }

    pub fn glyph_id_array(&self) -> &[u16] {
        &self.glyph_id_array
    }

    pub fn map_char_code(&self, code: u32) -> u16 {
        code.checked_sub(self.start_char_code)
            .and_then(|idx| self.glyph_id_array.get(idx as usize))
            .copied()
            .unwrap_or(0)
    }
}

/// [cmap Format 12](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage): Segmented coverage
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cmap12 {
    pub language: u32,
    groups: Vec<SequentialMapGroup>,
}

impl Cmap12 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor_at(8);
        let language = cursor.read()?;
        let groups = read_groups(&mut cursor)?;
        Ok(Cmap12 { language, groups })
    }

    pub fn groups(&self) -> &[SequentialMapGroup] {
        &self.groups
    }

    pub fn map_char_code(&self, code: u32) -> u16 {
        self.groups
            .iter()
            .find(|group| (group.start_char_code..=group.end_char_code).contains(&code))
            .map(|group| {
                group
                    .start_glyph_id
                    .wrapping_add(code - group.start_char_code) as u16
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::cmap as test_data;

    fn subtable(buf: &[u8]) -> CmapSubtable {
        CmapSubtable::read(FontData::new(buf)).unwrap()
    }

    #[test]
    fn format_4_delta() {
        let table = subtable(&test_data::uppercase_cmap4());
        assert_eq!(table.format(), 4);
        assert_eq!(table.map_char_code(u32::from('A')), 65);
        assert_eq!(table.map_char_code(u32::from('Z')), 90);
        assert_eq!(table.map_char_code(u32::from('a')), 0);
        assert_eq!(table.map_char_code(0x40), 0);
        // (0xFFFF + 1) mod 65536
        assert_eq!(table.map_char_code(0xFFFF), 0);
        assert_eq!(table.map_char_code(0x1_0000), 0);
    }

    #[test]
    fn format_4_first_matching_segment() {
        let CmapSubtable::Format4(table) = subtable(&test_data::repetitive_cmap4()) else {
            panic!("expected format 4");
        };
        assert_eq!(table.seg_count(), 2);
        assert!(table.glyph_id_array().is_empty());
        assert_eq!(table.map_char_code(6), 6);
        assert_eq!(table.map_char_code(64), 64);
        assert_eq!(table.map_char_code(65), 0);
    }

    #[test]
    fn format_4_range_offset() {
        let table = subtable(&test_data::range_offset_cmap4(0));
        assert_eq!(table.map_char_code(10), 5);
        // stored zero stays unmapped
        assert_eq!(table.map_char_code(11), 0);
        assert_eq!(table.map_char_code(12), 7);
        assert_eq!(table.map_char_code(13), 0);

        let table = subtable(&test_data::range_offset_cmap4(-6));
        assert_eq!(table.map_char_code(10), 0xFFFF);
        assert_eq!(table.map_char_code(11), 0);
        assert_eq!(table.map_char_code(12), 1);
    }

    #[test]
    fn trimmed_formats() {
        let table = subtable(&test_data::cmap6());
        assert_eq!(table.map_char_code(31), 0);
        assert_eq!(table.map_char_code(32), 1);
        assert_eq!(table.map_char_code(34), 3);
        assert_eq!(table.map_char_code(35), 0);

        let table = subtable(&test_data::cmap10());
        assert_eq!(table.format(), 10);
        assert_eq!(table.map_char_code(0x10000), 4);
        assert_eq!(table.map_char_code(0x10001), 9);
        assert_eq!(table.map_char_code(0xFFFF), 0);
    }

    #[test]
    fn format_12_groups() {
        let table = subtable(&test_data::cmap12());
        assert_eq!(table.map_char_code(0x1F600), 10);
        assert_eq!(table.map_char_code(0x1F602), 12);
        assert_eq!(table.map_char_code(0x1F603), 0);
    }

    #[test]
    fn format_2_is_parsed_not_mapped() {
        let table = subtable(&test_data::cmap2());
        let CmapSubtable::Format2(format2) = &table else {
            panic!("expected format 2");
        };
        assert_eq!(format2.sub_headers().len(), 1);
        assert_eq!(format2.sub_headers()[0].first_code, 0x20);
        assert_eq!(format2.glyph_id_array(), [3, 4]);
        assert!(!table.is_supported());
        assert_eq!(table.map_char_code(0x20), 0);
    }

    #[test]
    fn unknown_format() {
        let buf = ttf_test_data::be_buffer! { 14u16, 0u32 };
        let table = subtable(&buf);
        assert_eq!(table, CmapSubtable::Unsupported { format: 14 });
        assert_eq!(table.map_char_code(32), 0);
    }

    #[test]
    fn select_subtable() {
        let cmap = Cmap::read(FontData::new(&test_data::cmap_table())).unwrap();
        assert_eq!(cmap.num_tables(), 3);
        let format = |p, e| cmap.format(p, e).map(CmapSubtable::format);
        assert_eq!(format(platform::MACINTOSH, macintosh_encoding::ROMAN), Some(0));
        assert_eq!(format(platform::WINDOWS, windows_encoding::UNICODE_BMP), Some(4));
        assert_eq!(format(platform::WINDOWS, windows_encoding::UNICODE_FULL), Some(12));
        assert_eq!(format(platform::UNICODE, 3), None);

        assert_eq!(cmap.map_char_code(0x1F601), 11);
        // not in the format 12 subtable, so format 4 is used
        assert_eq!(cmap.map_char_code(u32::from('A')), 65);
        assert_eq!(cmap.map_char_code(u32::from('a')), 0);
    }

    #[test]
    fn subtable_out_of_bounds() {
        let buf = ttf_test_data::be_buffer! { 0u16, 1u16, 3u16, 1u16, 400u32 };
        assert_eq!(
            Cmap::read(FontData::new(&buf)),
            Err(ReadError::OutOfBounds)
        );
    }
}
