//! GSUB/GPOS structure samples

use ttf_types::Tag;

use crate::bebuffer::BeBuffer;

/// A GSUB table with scripts `DFLT` and `latn` (with a `TRK ` language),
/// features `liga` and `smcp`, and two lookups.
///
/// The first lookup is a ligature substitution covering glyph 10, with
/// ligatures 10 10 11 -> 20 and 10 11 -> 21. The second lookup's subtables
/// are not present.
pub fn gsub_sample() -> BeBuffer {
    BeBuffer::new()
        // header
        .extend([1u16, 0]) // version 1.0
        .extend([10u16, 64, 92]) // script list, feature list, lookup list
        // script list, at 10
        .push(2u16)
        .push(Tag::new(b"DFLT"))
        .push(14u16)
        .push(Tag::new(b"latn"))
        .push(26u16)
        // DFLT script
        .extend([4u16, 0]) // defaultLangSys, langSysCount
        .extend([0u16, 0xFFFF, 1, 0]) // lookupOrder, reqFeatureIndex, featureIndexCount, index
        // latn script
        .extend([10u16, 1])
        .push(Tag::new(b"TRK "))
        .push(20u16)
        .extend([0u16, 0xFFFF, 2, 0, 1]) // default lang sys
        .extend([0u16, 1, 1, 0]) // TRK lang sys
        // feature list, at 64
        .push(2u16)
        .push(Tag::new(b"liga"))
        .push(14u16)
        .push(Tag::new(b"smcp"))
        .push(20u16)
        .extend([0u16, 1, 0]) // liga: featureParams, lookupIndexCount, index
        .extend([0u16, 2, 0, 1]) // smcp
        // lookup list, at 92
        .extend([2u16, 6, 14])
        .extend([4u16, 0, 1, 20]) // type 4, flag 0, one subtable
        .extend([1u16, 0x0010, 2, 10, 20, 3]) // mark filtering set 3
        // ligature subst, at 118
        .extend([1u16, 28, 1, 8]) // format, coverage, ligatureSetCount, offset
        .extend([2u16, 6, 14]) // ligature set: count, offsets
        .extend([20u16, 3, 10, 11]) // ligature glyph, componentCount, components
        .extend([21u16, 2, 11])
        .extend([1u16, 1, 10]) // coverage format 1
}

/// A GPOS header whose lists are all empty.
pub fn gpos_empty() -> BeBuffer {
    BeBuffer::new()
        .extend([1u16, 0])
        .extend([10u16, 12, 14])
        .push(0u16) // scriptCount
        .push(0u16) // featureCount
        .push(0u16) // lookupCount
}
