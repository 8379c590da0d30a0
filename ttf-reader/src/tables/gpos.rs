//! The [GPOS](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) table

use types::{MajorMinor, Tag};

use super::layout::{FeatureList, LayoutTable, LookupList, ScriptList};
use crate::{tags, FontData, FontRead, ReadError, TopLevelTable};

/// The [GPOS](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) (Glyph Positioning) table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gpos {
    layout: LayoutTable,
}

impl TopLevelTable for Gpos {
    const TAG: Tag = tags::GPOS;
}

impl FontRead for Gpos {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        LayoutTable::read(data).map(|layout| Gpos { layout })
    }
}

impl Gpos {
    pub fn version(&self) -> MajorMinor {
        self.layout.version
    }

    /// Offset to the script list, from the beginning of the table.
    pub fn script_list_offset(&self) -> u16 {
        self.layout.script_list_offset
    }

    /// Offset to the feature list, from the beginning of the table.
    pub fn feature_list_offset(&self) -> u16 {
        self.layout.feature_list_offset
    }

    /// Offset to the lookup list, from the beginning of the table.
    pub fn lookup_list_offset(&self) -> u16 {
        self.layout.lookup_list_offset
    }

    pub fn feature_variations_offset(&self) -> Option<u32> {
        self.layout.feature_variations_offset
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

    pub fn layout(&self) -> &LayoutTable {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::layout as test_data;

    #[test]
    fn empty_lists() {
        let gpos = Gpos::read(FontData::new(&test_data::gpos_empty())).unwrap();
        assert_eq!(gpos.script_list_offset(), 10);
        assert_eq!(gpos.feature_list_offset(), 12);
        assert_eq!(gpos.lookup_list_offset(), 14);
        assert_eq!(gpos.feature_variations_offset(), None);
        assert!(gpos.script_list().is_empty());
        assert!(gpos.feature_list().is_empty());
        assert!(gpos.lookup_list().lookups().is_empty());
    }

    #[test]
    fn version_1_1_feature_variations() {
        let buf = ttf_test_data::be_buffer! {
            1u16, 1u16, 14u16, 16u16, 18u16, 0x20u32,
            0u16, 0u16, 0u16
        };
        let gpos = Gpos::read(FontData::new(&buf)).unwrap();
        assert_eq!(gpos.version(), MajorMinor::VERSION_1_1);
        assert_eq!(gpos.feature_variations_offset(), Some(0x20));
    }

    #[test]
    fn list_out_of_bounds() {
        let buf = ttf_test_data::be_buffer! { 1u16, 0u16, 10u16, 12u16, 40u16, 0u16, 0u16 };
        assert_eq!(
            Gpos::read(FontData::new(&buf)),
            Err(ReadError::OutOfBounds)
        );
    }
}
