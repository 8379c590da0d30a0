//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use alloc::string::String;
use alloc::vec::Vec;

use types::Tag;

use crate::{tags, Cursor, FontData, FontRead, ReadError, TopLevelTable};

/// Identifier for an informational string (or name).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameId(u16);

impl NameId {
    pub const COPYRIGHT_NOTICE: NameId = NameId(0);
    pub const FAMILY_NAME: NameId = NameId(1);
    pub const SUBFAMILY_NAME: NameId = NameId(2);
    pub const UNIQUE_ID: NameId = NameId(3);
    pub const FULL_NAME: NameId = NameId(4);
    pub const VERSION_STRING: NameId = NameId(5);
    pub const POSTSCRIPT_NAME: NameId = NameId(6);
    pub const TRADEMARK: NameId = NameId(7);
    pub const MANUFACTURER: NameId = NameId(8);
    pub const DESIGNER: NameId = NameId(9);
    pub const DESCRIPTION: NameId = NameId(10);
    pub const VENDOR_URL: NameId = NameId(11);
    pub const DESIGNER_URL: NameId = NameId(12);
    pub const LICENSE_DESCRIPTION: NameId = NameId(13);
    pub const LICENSE_URL: NameId = NameId(14);
    pub const TYPOGRAPHIC_FAMILY_NAME: NameId = NameId(16);
    pub const TYPOGRAPHIC_SUBFAMILY_NAME: NameId = NameId(17);
    pub const SAMPLE_TEXT: NameId = NameId(19);

    pub const fn new(raw: u16) -> Self {
        NameId(raw)
    }

    pub const fn to_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for NameId {
    fn from(value: u16) -> Self {
        NameId(value)
    }
}

/// The encoding used by a name record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf16Be,
    MacRoman,
    /// Bytes are taken as Latin-1 code points.
    Latin1,
}

impl Encoding {
    /// Determine the coding from the platform and encoding id.
    pub fn new(platform_id: u16, encoding_id: u16) -> Encoding {
        match (platform_id, encoding_id) {
            (0, _) | (3, _) => Encoding::Utf16Be,
            (1, 0) => Encoding::MacRoman,
            _ => Encoding::Latin1,
        }
    }

    /// Decode a string in this encoding.
    ///
    /// Unpaired surrogates, and a trailing odd byte, become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf16Be => {
                let units = bytes
                    .chunks(2)
                    .map(|pair| match pair {
                        [hi, lo] => u16::from_be_bytes([*hi, *lo]),
                        _ => 0xFFFD,
                    });
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
            Encoding::MacRoman => bytes.iter().map(|b| mac_roman(*b)).collect(),
            Encoding::Latin1 => bytes.iter().map(|b| char::from(*b)).collect(),
        }
    }
}

fn mac_roman(raw: u8) -> char {
    const START_REMAP: u8 = 128;
    if raw < START_REMAP {
        raw as char
    } else {
        let idx = (raw - START_REMAP) as usize;
        char::from_u32(MAC_ROMAN_DECODE[idx] as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

/// A single name record, with its string decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: NameId,
    /// String length (in bytes).
    pub length: u16,
    /// String offset from start of storage area (in bytes).
    pub offset: u16,
    pub value: String,
}

/// [Naming table](https://docs.microsoft.com/en-us/typography/opentype/spec/name)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Name {
    /// Table version number (0 or 1)
    pub version: u16,
    /// Offset to start of string storage (from start of table).
    pub storage_offset: u16,
    records: Vec<NameRecord>,
    lang_tags: Vec<String>,
}

impl Name {
    /// Number of name records.
    pub fn count(&self) -> u16 {
        self.records.len() as u16
    }

    /// The name records, in file order.
    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    /// The language tags of a version 1 table, for language ids from 0x8000.
    pub fn lang_tags(&self) -> &[String] {
        &self.lang_tags
    }

    /// The string of the first record with `name_id`, or an empty string.
    pub fn record(&self, name_id: NameId) -> &str {
        self.records
            .iter()
            .find(|record| record.name_id == name_id)
            .map(|record| record.value.as_str())
            .unwrap_or_default()
    }
}

impl TopLevelTable for Name {
    const TAG: Tag = tags::NAME;
}

fn read_string(
    data: FontData<'_>,
    storage_offset: u16,
    offset: u16,
    length: u16,
    encoding: Encoding,
) -> Result<String, ReadError> {
    let start = storage_offset as usize + offset as usize;
    data.read_bytes(start, length as usize)
        .map(|bytes| encoding.decode(bytes))
}

fn read_record(cursor: &mut Cursor<'_>) -> Result<(u16, u16, u16, u16, u16, u16), ReadError> {
    Ok((
        cursor.read()?,
        cursor.read()?,
        cursor.read()?,
        cursor.read()?,
        cursor.read()?,
        cursor.read()?,
    ))
}

impl FontRead for Name {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        let storage_offset: u16 = cursor.read()?;

        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let (platform_id, encoding_id, language_id, name_id, length, offset) =
                read_record(&mut cursor)?;
            let encoding = Encoding::new(platform_id, encoding_id);
            records.push(NameRecord {
                platform_id,
                encoding_id,
                language_id,
                name_id: NameId(name_id),
                length,
                offset,
                value: read_string(data, storage_offset, offset, length, encoding)?,
            });
        }

        let mut lang_tags = Vec::new();
        if version == 1 {
            let lang_tag_count: u16 = cursor.read()?;
            for _ in 0..lang_tag_count {
                let length = cursor.read()?;
                let offset = cursor.read()?;
                lang_tags.push(read_string(
                    data,
                    storage_offset,
                    offset,
                    length,
                    Encoding::Utf16Be,
                )?);
            }
        }

        Ok(Name {
            version,
            storage_offset,
            records,
            lang_tags,
        })
    }
}

/// a lookup table for the Mac Roman encoding. this matches the values 128..=255
/// to specific unicode values.
#[rustfmt::skip]
static MAC_ROMAN_DECODE: [u16; 128] = [
    196, 197, 199, 201, 209, 214, 220, 225, 224, 226, 228, 227, 229, 231, 233,
    232, 234, 235, 237, 236, 238, 239, 241, 243, 242, 244, 246, 245, 250, 249,
    251, 252, 8224, 176, 162, 163, 167, 8226, 182, 223, 174, 169, 8482, 180,
    168, 8800, 198, 216, 8734, 177, 8804, 8805, 165, 181, 8706, 8721, 8719,
    960, 8747, 170, 186, 937, 230, 248, 191, 161, 172, 8730, 402, 8776, 8710,
    171, 187, 8230, 160, 192, 195, 213, 338, 339, 8211, 8212, 8220, 8221, 8216,
    8217, 247, 9674, 255, 376, 8260, 8364, 8249, 8250, 64257, 64258, 8225, 183,
    8218, 8222, 8240, 194, 202, 193, 203, 200, 205, 206, 207, 204, 211, 212,
    63743, 210, 218, 219, 217, 305, 710, 732, 175, 728, 729, 730, 184, 733,
    731, 711,
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ttf_test_data::{be_buffer, tables};

    #[test]
    fn mac_roman() {
        let bytes = b"M\x9Fller-Lanc\x8E";
        assert_eq!(Encoding::MacRoman.decode(bytes), "Müller-Lancé");
        assert_eq!(Encoding::new(1, 0), Encoding::MacRoman);
    }

    #[test]
    fn lone_surrogate_at_end() {
        // DEVANAGARI LETTER SHORT A (U+0904), unpaired high surrogate (0xD800)
        let decoded = Encoding::Utf16Be.decode(&[0x09, 0x04, 0xD8, 0x00]);
        assert_eq!(decoded, "ऄ\u{FFFD}");
        let pair = tables::utf16_be("😀");
        assert_eq!(Encoding::Utf16Be.decode(&pair), "😀");
    }

    #[test]
    fn read_records() {
        let family = tables::utf16_be("Ünïcode Sans");
        let buf = tables::name(&[
            (1, 0, 0, 1, b"Mac \x80"),
            (3, 1, 0x409, 1, &family),
            (3, 1, 0x409, 2, &tables::utf16_be("Bold")),
            (2, 0, 0, 7, b"caf\xE9"),
        ]);
        let name = Name::read(FontData::new(&buf)).unwrap();
        assert_eq!(name.count(), 4);
        assert_eq!(name.storage_offset, 6 + 12 * 4);
        let values: Vec<_> = name.records().iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["Mac Ä", "Ünïcode Sans", "Bold", "café"]);
        // first match wins
        assert_eq!(name.record(NameId::FAMILY_NAME), "Mac Ä");
        assert_eq!(name.record(NameId::SUBFAMILY_NAME), "Bold");
        assert_eq!(name.record(NameId::TRADEMARK), "café");
        assert_eq!(name.record(NameId::DESIGNER), "");
        assert_eq!(name.records()[1].language_id, 0x409);
        assert_eq!(name.records()[1].length, family.len() as u16);
    }

    #[test]
    fn version_1_lang_tags() {
        let tag = tables::utf16_be("en-GB");
        let buf = be_buffer! {
            1u16, 1u16, 24u16,
            3u16, 1u16, 0x8000u16, 1u16, 2u16, 0u16,
            1u16, 10u16, 2u16
        }
        .extend_bytes(&[0, b'A'])
        .extend_bytes(&tag);
        let name = Name::read(FontData::new(&buf)).unwrap();
        assert_eq!(name.record(NameId::FAMILY_NAME), "A");
        assert_eq!(name.lang_tags(), ["en-GB"]);
    }

    #[test]
    fn string_out_of_bounds() {
        let buf = be_buffer! {
            0u16, 1u16, 18u16,
            3u16, 1u16, 0u16, 1u16, 20u16, 0u16
        };
        assert_eq!(Name::read(FontData::new(&buf)), Err(ReadError::OutOfBounds));
    }
}
