//! OpenType Layout common table formats
//!
//! The script, feature and lookup lists shared by `GSUB` and `GPOS`, and
//! coverage tables. Lookup subtables are decoded by the owning table; the
//! lookup list keeps their offsets.

use alloc::vec::Vec;
use std::cmp::Ordering;

use types::{GlyphId, MajorMinor, Tag};

use crate::{FontData, ReadError};

/// Sentinel for [`LangSys::required_feature_index`] when there is none.
pub const NO_REQUIRED_FEATURE: u16 = 0xFFFF;

/// The header and lists shared by `GSUB` and `GPOS`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutTable {
    pub version: MajorMinor,
    pub script_list_offset: u16,
    pub feature_list_offset: u16,
    pub lookup_list_offset: u16,
    /// Present in version 1.1 and later.
    pub feature_variations_offset: Option<u32>,
    pub script_list: ScriptList,
    pub feature_list: FeatureList,
    pub lookup_list: LookupList,
}

impl LayoutTable {
    pub(crate) fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: MajorMinor = cursor.read()?;
        if version.major != 1 {
            return Err(ReadError::InvalidFormat(version.major as _));
        }
        let script_list_offset: u16 = cursor.read()?;
        let feature_list_offset: u16 = cursor.read()?;
        let lookup_list_offset: u16 = cursor.read()?;
        let feature_variations_offset = if version.minor >= 1 {
            Some(cursor.read()?)
        } else {
            None
        };
        Ok(LayoutTable {
            version,
            script_list_offset,
            feature_list_offset,
            lookup_list_offset,
            feature_variations_offset,
            script_list: ScriptList::read(subtable(data, script_list_offset as usize)?)?,
            feature_list: FeatureList::read(subtable(data, feature_list_offset as usize)?)?,
            lookup_list: LookupList::read(subtable(data, lookup_list_offset as usize)?)?,
        })
    }
}

/// The data starting at `offset`, which must be in bounds.
pub(crate) fn subtable(data: FontData<'_>, offset: usize) -> Result<FontData<'_>, ReadError> {
    data.split_off(offset).ok_or(ReadError::OutOfBounds)
}

/// A tag and an offset from the start of the containing list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagRecord {
    pub tag: Tag,
    pub offset: u16,
}

fn read_tag_records(data: FontData<'_>, offset: usize) -> Result<Vec<TagRecord>, ReadError> {
    let mut cursor = data.cursor_at(offset);
    let count: u16 = cursor.read()?;
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(TagRecord {
            tag: cursor.read()?,
            offset: cursor.read()?,
        });
    }
    Ok(records)
}

/// [Script List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-list-table-and-script-record)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptList {
    records: Vec<TagRecord>,
    scripts: Vec<Script>,
}

impl ScriptList {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let records = read_tag_records(data, 0)?;
        let scripts = records
            .iter()
            .map(|record| Script::read(subtable(data, record.offset as usize)?))
            .collect::<Result<_, _>>()?;
        Ok(ScriptList { records, scripts })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn script_records(&self) -> &[TagRecord] {
        &self.records
    }

    pub fn scripts(&self) -> impl Iterator<Item = (Tag, &Script)> + '_ {
        self.records
            .iter()
            .map(|record| record.tag)
            .zip(&self.scripts)
    }

    /// The first script with the given tag.
    pub fn find_script(&self, tag: Tag) -> Option<&Script> {
        let tag = tag.to_u32();
        self.scripts()
            .find(|(script_tag, _)| script_tag.to_u32() == tag)
            .map(|(_, script)| script)
    }
}

/// [Script Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-table-and-language-system-record)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Script {
    pub default_lang_sys_offset: u16,
    default_lang_sys: Option<LangSys>,
    lang_sys_records: Vec<TagRecord>,
    lang_sys: Vec<LangSys>,
}

impl Script {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let default_lang_sys_offset: u16 = data.read_at(0)?;
        let lang_sys_records = read_tag_records(data, 2)?;
        let default_lang_sys = match default_lang_sys_offset {
            0 => None,
            offset => Some(LangSys::read(subtable(data, offset as usize)?)?),
        };
        let lang_sys = lang_sys_records
            .iter()
            .map(|record| LangSys::read(subtable(data, record.offset as usize)?))
            .collect::<Result<_, _>>()?;
        Ok(Script {
            default_lang_sys_offset,
            default_lang_sys,
            lang_sys_records,
            lang_sys,
        })
    }

    /// The language system used when no specific language is requested.
    pub fn default_lang_sys(&self) -> Option<&LangSys> {
        self.default_lang_sys.as_ref()
    }

    pub fn lang_sys_records(&self) -> &[TagRecord] {
        &self.lang_sys_records
    }

    pub fn lang_sys(&self) -> impl Iterator<Item = (Tag, &LangSys)> + '_ {
        self.lang_sys_records
            .iter()
            .map(|record| record.tag)
            .zip(&self.lang_sys)
    }

    pub fn find_lang_sys(&self, tag: Tag) -> Option<&LangSys> {
        self.lang_sys()
            .find(|(lang_tag, _)| *lang_tag == tag)
            .map(|(_, lang_sys)| lang_sys)
    }
}

/// [Language System Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#language-system-table)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LangSys {
    /// Reserved; always 0.
    pub lookup_order_offset: u16,
    /// [`NO_REQUIRED_FEATURE`] if no feature is required.
    pub required_feature_index: u16,
    feature_indices: Vec<u16>,
}

impl LangSys {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let lookup_order_offset = cursor.read()?;
        let required_feature_index = cursor.read()?;
        let count: u16 = cursor.read()?;
        let feature_indices = cursor.read_array(count as usize)?;
        Ok(LangSys {
            lookup_order_offset,
            required_feature_index,
            feature_indices,
        })
    }

    pub fn required_feature(&self) -> Option<u16> {
        (self.required_feature_index != NO_REQUIRED_FEATURE).then_some(self.required_feature_index)
    }

    /// Indices into the feature list.
    pub fn feature_indices(&self) -> &[u16] {
        &self.feature_indices
    }

    /// `true` if this language system uses feature `index`.
    pub fn is_feature_indexed(&self, index: u16) -> bool {
        self.feature_indices.contains(&index)
    }
}

/// [Feature List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-list-table)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureList {
    records: Vec<TagRecord>,
    features: Vec<Feature>,
}

impl FeatureList {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let records = read_tag_records(data, 0)?;
        let features = records
            .iter()
            .map(|record| Feature::read(subtable(data, record.offset as usize)?))
            .collect::<Result<_, _>>()?;
        Ok(FeatureList { records, features })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn feature_records(&self) -> &[TagRecord] {
        &self.records
    }

    /// The tag and feature at `index`, as referenced by a [`LangSys`].
    pub fn get(&self, index: u16) -> Option<(Tag, &Feature)> {
        let index = index as usize;
        Some((self.records.get(index)?.tag, self.features.get(index)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Feature)> + '_ {
        self.records
            .iter()
            .map(|record| record.tag)
            .zip(&self.features)
    }
}

/// [Feature Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#feature-table)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    pub feature_params_offset: u16,
    lookup_list_indices: Vec<u16>,
}

impl Feature {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let feature_params_offset = cursor.read()?;
        let count: u16 = cursor.read()?;
        let lookup_list_indices = cursor.read_array(count as usize)?;
        Ok(Feature {
            feature_params_offset,
            lookup_list_indices,
        })
    }

    pub fn lookup_list_indices(&self) -> &[u16] {
        &self.lookup_list_indices
    }
}

/// [Lookup List Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-list-table)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupList {
    lookup_offsets: Vec<u16>,
    lookups: Vec<Lookup>,
}

impl LookupList {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count: u16 = cursor.read()?;
        let lookup_offsets: Vec<u16> = cursor.read_array(count as usize)?;
        let lookups = lookup_offsets
            .iter()
            .map(|offset| Lookup::read(subtable(data, *offset as usize)?))
            .collect::<Result<_, _>>()?;
        Ok(LookupList {
            lookup_offsets,
            lookups,
        })
    }

    pub fn lookup_offsets(&self) -> &[u16] {
        &self.lookup_offsets
    }

    pub fn lookups(&self) -> &[Lookup] {
        &self.lookups
    }

    pub fn get(&self, index: u16) -> Option<&Lookup> {
        self.lookups.get(index as usize)
    }
}

/// Lookup qualifiers, the `lookupFlag` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupFlag(u16);

impl LookupFlag {
    pub const RIGHT_TO_LEFT: u16 = 0x0001;
    pub const IGNORE_BASE_GLYPHS: u16 = 0x0002;
    pub const IGNORE_LIGATURES: u16 = 0x0004;
    pub const IGNORE_MARKS: u16 = 0x0008;
    pub const USE_MARK_FILTERING_SET: u16 = 0x0010;

    pub const fn from_bits(bits: u16) -> Self {
        LookupFlag(bits)
    }

    pub const fn to_bits(self) -> u16 {
        self.0
    }

    pub fn right_to_left(self) -> bool {
        self.0 & Self::RIGHT_TO_LEFT != 0
    }

    pub fn ignore_base_glyphs(self) -> bool {
        self.0 & Self::IGNORE_BASE_GLYPHS != 0
    }

    pub fn ignore_ligatures(self) -> bool {
        self.0 & Self::IGNORE_LIGATURES != 0
    }

    pub fn ignore_marks(self) -> bool {
        self.0 & Self::IGNORE_MARKS != 0
    }

    pub fn use_mark_filtering_set(self) -> bool {
        self.0 & Self::USE_MARK_FILTERING_SET != 0
    }

    /// The mark attachment class filter, in the high byte.
    pub fn mark_attachment_class(self) -> u16 {
        self.0 >> 8
    }
}

/// [Lookup Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-table)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lookup {
    pub lookup_type: u16,
    pub lookup_flag: LookupFlag,
    /// Offsets from the start of this lookup.
    subtable_offsets: Vec<u16>,
    /// Present only when [`LookupFlag::USE_MARK_FILTERING_SET`] is set.
    pub mark_filtering_set: Option<u16>,
}

impl Lookup {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let lookup_type = cursor.read()?;
        let lookup_flag = LookupFlag::from_bits(cursor.read()?);
        let count: u16 = cursor.read()?;
        let subtable_offsets = cursor.read_array(count as usize)?;
        let mark_filtering_set = if lookup_flag.use_mark_filtering_set() {
            Some(cursor.read()?)
        } else {
            None
        };
        Ok(Lookup {
            lookup_type,
            lookup_flag,
            subtable_offsets,
            mark_filtering_set,
        })
    }

    pub fn subtable_offsets(&self) -> &[u16] {
        &self.subtable_offsets
    }

    pub fn subtable_count(&self) -> usize {
        self.subtable_offsets.len()
    }
}

/// [Coverage Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoverageTable {
    /// Individual glyph ids, in numerical order.
    Format1 { glyphs: Vec<GlyphId> },
    /// Ranges of glyph ids, ordered by start glyph.
    Format2 { ranges: Vec<RangeRecord> },
}

/// Used in [`CoverageTable::Format2`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeRecord {
    pub start_glyph_id: GlyphId,
    pub end_glyph_id: GlyphId,
    /// Coverage index of the first glyph in the range.
    pub start_coverage_index: u16,
}

impl CoverageTable {
    pub(crate) fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        match format {
            1 => Ok(CoverageTable::Format1 {
                glyphs: cursor.read_array(count as usize)?,
            }),
            2 => {
                let mut ranges = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    ranges.push(RangeRecord {
                        start_glyph_id: cursor.read()?,
                        end_glyph_id: cursor.read()?,
                        start_coverage_index: cursor.read()?,
                    });
                }
                Ok(CoverageTable::Format2 { ranges })
            }
            other => Err(ReadError::InvalidFormat(other as _)),
        }
    }

    /// The coverage index of `gid`, or `None` if it is not covered.
    pub fn get(&self, gid: GlyphId) -> Option<u16> {
        match self {
            CoverageTable::Format1 { glyphs } => {
                glyphs.binary_search(&gid).ok().map(|idx| idx as u16)
            }
            CoverageTable::Format2 { ranges } => {
                let idx = ranges
                    .binary_search_by(|range| {
                        if range.end_glyph_id < gid {
                            Ordering::Less
                        } else if range.start_glyph_id > gid {
                            Ordering::Greater
                        } else {
                            Ordering::Equal
                        }
                    })
                    .ok()?;
                let range = &ranges[idx];
                let delta = gid.to_u16() - range.start_glyph_id.to_u16();
                Some(range.start_coverage_index.wrapping_add(delta))
            }
        }
    }

    /// Every covered glyph, in coverage index order.
    pub fn iter(&self) -> impl Iterator<Item = GlyphId> + '_ {
        // all one expression so that we have a single return type
        let (iter1, iter2) = match self {
            CoverageTable::Format1 { glyphs } => (Some(glyphs.iter().copied()), None),
            CoverageTable::Format2 { ranges } => {
                let iter = ranges.iter().flat_map(|range| {
                    (range.start_glyph_id.to_u16()..=range.end_glyph_id.to_u16())
                        .map(GlyphId::new)
                });
                (None, Some(iter))
            }
        };
        iter1
            .into_iter()
            .flatten()
            .chain(iter2.into_iter().flatten())
    }
}
