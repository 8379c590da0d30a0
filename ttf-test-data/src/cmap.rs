//! cmap subtables and tables

use crate::{be_buffer, bebuffer::BeBuffer};

/// Contains two codepoint ranges, both [6, 64]. Surely you don't duplicate them?
pub fn repetitive_cmap4() -> BeBuffer {
    // <https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values>
    be_buffer! {
      4_u16,                      // uint16	format
      0_u16,                      // uint16	length, unused
      0_u16,                      // uint16	language, unused
      4_u16,                      // uint16	segCountX2, 2 * 2 segments
      0_u16,                      // uint16	searchRange, unused
      0_u16,                      // uint16	entrySelector, unused
      0_u16,                      // uint16	rangeShift, unused
      // segCount endCode entries
      64_u16,                     // uint16	endCode[0]
      64_u16,                     // uint16	endCode[1]

      0_u16,                      // uint16	reservedPad, unused

      // segCount startCode entries
      6_u16,                      // uint16	startCode[0]
      6_u16,                      // uint16	startCode[1]

      // segCount idDelta entries
      0_u16,                      // uint16	idDelta[0]
      0_u16,                      // uint16	idDelta[1]

      // segCount idRangeOffset entries
      0_u16,                      // uint16	idRangeOffset[0]
      0_u16                       // uint16	idRangeOffset[1]

      // no glyphIdArray entries
    }
}

/// One segment `A..=Z` mapped by delta 0, plus the required final segment.
pub fn uppercase_cmap4() -> BeBuffer {
    be_buffer! {
      4_u16,                      // format
      32_u16,                     // length
      0_u16,                      // language
      4_u16,                      // segCountX2
      4_u16,                      // searchRange
      1_u16,                      // entrySelector
      0_u16,                      // rangeShift
      90_u16, 0xFFFF_u16,         // endCode
      0_u16,                      // reservedPad
      65_u16, 0xFFFF_u16,         // startCode
      0_i16, 1_i16,               // idDelta
      0_u16, 0_u16                // idRangeOffset
    }
}

/// A segment `10..=12` that indexes into the glyph id array, which
/// holds `[5, 0, 7]`. `id_delta` is added to nonzero entries.
pub fn range_offset_cmap4(id_delta: i16) -> BeBuffer {
    be_buffer! {
      4_u16,                      // format
      38_u16,                     // length
      0_u16,                      // language
      4_u16,                      // segCountX2
      4_u16,                      // searchRange
      1_u16,                      // entrySelector
      0_u16,                      // rangeShift
      12_u16, 0xFFFF_u16,         // endCode
      0_u16,                      // reservedPad
      10_u16, 0xFFFF_u16,         // startCode
      id_delta, 1_i16,            // idDelta
      // idRangeOffset[0] is 4 bytes from glyphIdArray[0]
      4_u16, 0_u16,               // idRangeOffset
      5_u16, 0_u16, 7_u16         // glyphIdArray
    }
}

/// Codes 32..=34 map to glyphs 1, 2, 3.
pub fn cmap6() -> BeBuffer {
    be_buffer! {
      6_u16,                      // format
      16_u16,                     // length
      0_u16,                      // language
      32_u16,                     // firstCode
      3_u16,                      // entryCount
      1_u16, 2_u16, 3_u16         // glyphIdArray
    }
}

/// Codes 0x10000..=0x10001 map to glyphs 4 and 9.
pub fn cmap10() -> BeBuffer {
    be_buffer! {
      10_u16,                     // format
      0_u16,                      // reserved
      24_u32,                     // length
      0_u32,                      // language
      0x10000_u32,                // startCharCode
      2_u32,                      // numChars
      4_u16, 9_u16                // glyphs
    }
}

/// A single group `0x1F600..=0x1F602` starting at glyph 10.
pub fn cmap12() -> BeBuffer {
    be_buffer! {
      12_u16,                     // format
      0_u16,                      // reserved
      28_u32,                     // length
      0_u32,                      // language
      1_u32,                      // numGroups
      0x1F600_u32, 0x1F602_u32, 10_u32
    }
}

/// A format 2 subtable where every high byte uses subheader 0, which maps
/// single byte codes 0x20..=0x21.
pub fn cmap2() -> BeBuffer {
    let buf = be_buffer! {
      2_u16,                      // format
      530_u16,                    // length
      0_u16                       // language
    };
    // subHeaderKeys: all point at subheader 0
    buf.extend([0u16; 256])
        .extend([0x20u16, 2]) // firstCode, entryCount
        .extend([0i16]) // idDelta
        .extend([2u16]) // idRangeOffset
        .extend([3u16, 4]) // glyphIdArray
}

/// A format 0 subtable mapping 'A' and 'B' to glyphs 1 and 2.
pub fn cmap0() -> BeBuffer {
    let mut glyphs = [0u8; 256];
    glyphs[b'A' as usize] = 1;
    glyphs[b'B' as usize] = 2;
    be_buffer! { 0_u16, 262_u16, 0_u16 }.extend_bytes(&glyphs)
}

/// A complete cmap with (1, 0) format 0, (3, 1) format 4 and (3, 10)
/// format 12 subtables.
pub fn cmap_table() -> BeBuffer {
    let format0 = cmap0();
    let format4 = uppercase_cmap4();
    let format12 = cmap12();
    let header_len = 4 + 3 * 8;
    let offset0 = header_len as u32;
    let offset4 = offset0 + format0.len() as u32;
    let offset12 = offset4 + format4.len() as u32;
    be_buffer! {
      0_u16,                      // version
      3_u16,                      // numTables
      1_u16, 0_u16, offset0,      // Macintosh, Roman
      3_u16, 1_u16, offset4,      // Windows, Unicode BMP
      3_u16, 10_u16, offset12     // Windows, Unicode full
    }
    .extend_bytes(&format0)
    .extend_bytes(&format4)
    .extend_bytes(&format12)
}
