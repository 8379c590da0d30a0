//! The [GSUB](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub) table

use alloc::vec::Vec;

use types::{GlyphId, MajorMinor, Tag};

use super::layout::{subtable, CoverageTable, FeatureList, LayoutTable, LookupList, ScriptList};
use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

/// The lookup type of a ligature substitution.
pub const LIGATURE_SUBST: u16 = 4;

/// The [GSUB](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub) (Glyph Substitution) table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gsub {
    layout: LayoutTable,
    /// The subtables of each lookup, for ligature lookups; empty otherwise.
    ligature_substs: Vec<Vec<LigatureSubstFormat1>>,
}

impl TopLevelTable for Gsub {
    const TAG: Tag = tags::GSUB;
}

impl FontRead for Gsub {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let layout = LayoutTable::read(data)?;
        let lookup_list = subtable(data, layout.lookup_list_offset as usize)?;
        let ligature_substs = layout
            .lookup_list
            .lookup_offsets()
            .iter()
            .zip(layout.lookup_list.lookups())
            .map(|(offset, lookup)| {
                if lookup.lookup_type != LIGATURE_SUBST {
                    return Ok(Vec::new());
                }
                let lookup_data = subtable(lookup_list, *offset as usize)?;
                lookup
                    .subtable_offsets()
                    .iter()
                    .map(|offset| {
                        LigatureSubstFormat1::read(subtable(lookup_data, *offset as usize)?)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, ReadError>>()?;
        Ok(Gsub {
            layout,
            ligature_substs,
        })
    }
}

impl Gsub {
    pub fn version(&self) -> MajorMinor {
        self.layout.version
    }

    pub fn script_list(&self) -> &ScriptList {
        &self.layout.script_list
    }

    pub fn feature_list(&self) -> &FeatureList {
        &self.layout.feature_list
    }

    pub fn lookup_list(&self) -> &LookupList {
        &self.layout.lookup_list
    }

    /// The header and every decoded list.
    pub fn layout(&self) -> &LayoutTable {
        &self.layout
    }

    /// The subtables of lookup `lookup_index`.
    ///
    /// Empty unless that lookup is a ligature substitution.
    pub fn ligature_substs(&self, lookup_index: u16) -> &[LigatureSubstFormat1] {
        self.ligature_substs
            .get(lookup_index as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// [Ligature Substitution Format 1](https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#41-ligature-substitution-format-1)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LigatureSubstFormat1 {
    pub coverage: CoverageTable,
    /// Ordered by coverage index.
    pub ligature_sets: Vec<LigatureSet>,
}

/// Part of [`LigatureSubstFormat1`]: the ligatures starting with one glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LigatureSet {
    /// Ordered by preference.
    pub ligatures: Vec<Ligature>,
}

/// Part of [`LigatureSubstFormat1`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ligature {
    /// glyph ID of ligature to substitute
    pub ligature_glyph: GlyphId,
    /// The components after the first, in writing order.
    pub component_glyph_ids: Vec<GlyphId>,
}

impl FontRead for LigatureSubstFormat1 {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != 1 {
            return Err(ReadError::InvalidFormat(format as _));
        }
        let coverage_offset: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        let set_offsets: Vec<u16> = cursor.read_array(count as usize)?;
        let coverage = CoverageTable::read(subtable(data, coverage_offset as usize)?)?;
        let ligature_sets = set_offsets
            .iter()
            .map(|offset| LigatureSet::read(subtable(data, *offset as usize)?))
            .collect::<Result<_, _>>()?;
        Ok(LigatureSubstFormat1 {
            coverage,
            ligature_sets,
        })
    }
}

impl LigatureSubstFormat1 {
    /// The ligatures that start with `first`, if it is covered.
    pub fn ligature_set(&self, first: GlyphId) -> Option<&LigatureSet> {
        let index = self.coverage.get(first)?;
        self.ligature_sets.get(index as usize)
    }

    /// The ligature glyph replacing `first` followed by `rest`.
    pub fn find_ligature(&self, first: GlyphId, rest: &[GlyphId]) -> Option<GlyphId> {
        self.ligature_set(first)?
            .ligatures
            .iter()
            .find(|ligature| ligature.component_glyph_ids == rest)
            .map(|ligature| ligature.ligature_glyph)
    }
}

impl LigatureSet {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let count: u16 = cursor.read()?;
        let offsets: Vec<u16> = cursor.read_array(count as usize)?;
        let ligatures = offsets
            .iter()
            .map(|offset| Ligature::read(subtable(data, *offset as usize)?))
            .collect::<Result<_, _>>()?;
        Ok(LigatureSet { ligatures })
    }
}

impl Ligature {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let ligature_glyph = cursor.read()?;
        let component_count: u16 = cursor.read()?;
        let component_glyph_ids = cursor.read_array(component_count.saturating_sub(1) as usize)?;
        Ok(Ligature {
            ligature_glyph,
            component_glyph_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::{layout as test_data, BeBuffer};

    #[test]
    fn ligature_lookup() {
        let gsub = Gsub::read(FontData::new(&test_data::gsub_sample())).unwrap();
        assert_eq!(gsub.version(), MajorMinor::VERSION_1_0);
        let latn = gsub.script_list().find_script(Tag::new(b"latn")).unwrap();
        let feature_index = latn.default_lang_sys().unwrap().feature_indices()[0];
        let (tag, liga) = gsub.feature_list().get(feature_index).unwrap();
        assert_eq!(tag, Tag::new(b"liga"));
        let lookup = gsub.lookup_list().get(liga.lookup_list_indices()[0]).unwrap();
        // ligature substitution
        assert_eq!(lookup.lookup_type, LIGATURE_SUBST);
    }

    #[test]
    fn ligature_subtables() {
        let gsub = Gsub::read(FontData::new(&test_data::gsub_sample())).unwrap();
        let substs = gsub.ligature_substs(0);
        assert_eq!(substs.len(), 1);
        let subst = &substs[0];
        assert_eq!(subst.coverage.get(GlyphId::new(10)), Some(0));
        let set = subst.ligature_set(GlyphId::new(10)).unwrap();
        assert_eq!(
            set.ligatures[0],
            Ligature {
                ligature_glyph: GlyphId::new(20),
                component_glyph_ids: vec![GlyphId::new(10), GlyphId::new(11)],
            }
        );
        assert_eq!(set.ligatures[1].component_glyph_ids, [GlyphId::new(11)]);
        assert!(subst.ligature_set(GlyphId::new(11)).is_none());

        let gid = GlyphId::new;
        assert_eq!(subst.find_ligature(gid(10), &[gid(11)]), Some(gid(21)));
        assert_eq!(subst.find_ligature(gid(10), &[gid(10), gid(11)]), Some(gid(20)));
        assert_eq!(subst.find_ligature(gid(10), &[gid(10)]), None);

        // the second lookup is not a ligature lookup
        assert!(gsub.ligature_substs(1).is_empty());
        assert!(gsub.ligature_substs(9).is_empty());
    }

    #[test]
    fn ligature_subst_bad_format() {
        let buf = BeBuffer::new().extend([2u16, 0, 0]);
        assert_eq!(
            LigatureSubstFormat1::read(FontData::new(&buf)),
            Err(ReadError::InvalidFormat(2))
        );
    }
}
