//! Builders for the fixed-layout tables, and for small complete fonts.

use ttf_types::{Fixed, LongDateTime, MajorMinor, Tag, Version16Dot16};

use crate::{bebuffer::BeBuffer, glyf, FontBuilder};

/// The head magic number.
pub const HEAD_MAGIC: u32 = 0x5F0F3CF5;

/// A 'head' table with the given units per em and loca format.
pub fn head(units_per_em: u16, index_to_loc_format: i16) -> BeBuffer {
    BeBuffer::new()
        .extend([1u16, 0])
        .push(Fixed::from_f64(2.5))
        .extend([0x1234_5678u32, HEAD_MAGIC])
        .extend([0x000Bu16, units_per_em])
        .extend([LongDateTime::new(3_600), LongDateTime::new(7_200)])
        .extend([-20i16, -250, 1100, 900])
        .extend([1u16, 8])
        .extend([2i16, index_to_loc_format, 0])
}

/// A 'hhea' table.
pub fn hhea(ascender: i16, descender: i16, number_of_h_metrics: u16) -> BeBuffer {
    BeBuffer::new()
        .push(MajorMinor::VERSION_1_0)
        .extend([ascender, descender, 90])
        .push(1200u16)
        .extend([-20i16, -30, 1150, 1, 0, 0])
        .extend([0i16, 0, 0, 0])
        .push(0i16)
        .push(number_of_h_metrics)
}

/// A version 0.5 'maxp' table.
pub fn maxp(num_glyphs: u16) -> BeBuffer {
    BeBuffer::new()
        .push(Version16Dot16::VERSION_0_5)
        .push(num_glyphs)
}

/// A version 1.0 'maxp' table; the trailing fields count up from 1.
pub fn maxp_v1(num_glyphs: u16) -> BeBuffer {
    BeBuffer::new()
        .push(Version16Dot16::VERSION_1_0)
        .push(num_glyphs)
        .extend(1u16..=13)
}

/// An 'hmtx' table from long metrics plus trailing side bearings.
pub fn hmtx(metrics: &[(u16, i16)], tail: &[i16]) -> BeBuffer {
    let mut buf = BeBuffer::new();
    for (advance, lsb) in metrics {
        buf = buf.push(*advance).push(*lsb);
    }
    buf.extend(tail.iter().copied())
}

/// An 'hdmx' table from (pixel size, max width, widths) records. Records
/// are padded to 32-bit alignment.
pub fn hdmx(records: &[(u8, u8, &[u8])]) -> BeBuffer {
    let num_glyphs = records.first().map(|record| record.2.len()).unwrap_or(0);
    let size_device_record = (num_glyphs + 2).next_multiple_of(4);
    let mut buf = BeBuffer::new()
        .push(0u16)
        .push(records.len() as u16)
        .push(size_device_record as u32);
    for (pixel_size, max_width, widths) in records {
        let padding = size_device_record - widths.len() - 2;
        buf = buf
            .push(*pixel_size)
            .push(*max_width)
            .extend_bytes(widths)
            .extend_bytes(&vec![0u8; padding]);
    }
    buf
}

/// A single name record: (platform, encoding, language, name id, encoded bytes)
pub type NameRecordData<'a> = (u16, u16, u16, u16, &'a [u8]);

/// A format 0 'name' table.
pub fn name(records: &[NameRecordData]) -> BeBuffer {
    let string_offset = 6 + 12 * records.len() as u16;
    let mut buf = BeBuffer::new()
        .push(0u16)
        .push(records.len() as u16)
        .push(string_offset);
    let mut offset = 0u16;
    for (platform, encoding, language, name_id, bytes) in records {
        buf = buf
            .extend([*platform, *encoding, *language, *name_id])
            .extend([bytes.len() as u16, offset]);
        offset += bytes.len() as u16;
    }
    for (.., bytes) in records {
        buf = buf.extend_bytes(bytes);
    }
    buf
}

/// Encode a string as UTF-16BE.
pub fn utf16_be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// The smallest interesting font: two glyphs, the first empty and the
/// second a triangle, with one long metric.
pub fn minimal_font() -> Vec<u8> {
    let mut builder = FontBuilder::new();
    builder
        .add_raw(Tag::new(b"head"), head(1000, 0))
        .add_raw(Tag::new(b"maxp"), maxp(2))
        .add_raw(Tag::new(b"hhea"), hhea(800, -200, 1))
        .add_raw(Tag::new(b"hmtx"), hmtx(&[(500, 10)], &[10]))
        // short offsets store offset / 2
        .add_raw(Tag::new(b"loca"), BeBuffer::new().extend([0u16, 0, 15]))
        .add_raw(Tag::new(b"glyf"), glyf::triangle());
    builder.build()
}
